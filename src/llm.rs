use std::fmt;
use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::loader::Document;

/// Prompt used for every summary; `{text}` receives the loaded content.
pub const SUMMARY_TEMPLATE: &str = "
Provide a summary of the following content in 300 words:
Content: {text}
";

const TEXT_VARIABLE: &str = "{text}";
const DOCUMENT_SEPARATOR: &str = "\n\n";

/// The caller's API key for the language-model provider. Never printed.
#[derive(Clone, Default)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, text: &str) -> String {
        self.template.replace(TEXT_VARIABLE, text)
    }

    /// Concatenates every document into one context and renders the prompt
    /// around it.
    pub fn stuff(&self, documents: &[Document]) -> String {
        let text = documents
            .iter()
            .map(|doc| doc.page_content.as_str())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);
        self.render(&text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(SUMMARY_TEMPLATE)
    }
}

pub trait Summarizer {
    type Error: fmt::Display;

    fn summarize(
        &self,
        credential: &Credential,
        prompt: &PromptTemplate,
        documents: &[Document],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format from LLM")]
    EmptyCompletion,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Summarizer backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ChatSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

impl ChatSummarizer {
    pub fn new(client: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub async fn complete(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let completion = res.json::<CompletionResponse>().await?;
        parse_completion(completion)
    }
}

fn parse_completion(completion: CompletionResponse) -> Result<String, LlmError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(LlmError::EmptyCompletion)
}

impl Summarizer for ChatSummarizer {
    type Error = LlmError;

    async fn summarize(
        &self,
        credential: &Credential,
        prompt: &PromptTemplate,
        documents: &[Document],
    ) -> Result<String, LlmError> {
        let rendered = prompt.stuff(documents);
        tracing::debug!(model = %self.model, prompt_chars = rendered.len(), "requesting summary");
        self.complete(credential, &rendered).await
    }
}
