use crate::error::{AppError, Result};
use crate::llm::{Credential, PromptTemplate, Summarizer};
use crate::loader::{ContentLoader, Document};
use crate::target::{TargetUrl, UrlKind};

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The URL exactly as submitted.
    pub url: String,
    pub source: UrlKind,
    pub text: String,
    pub document_count: usize,
    pub word_count: usize,
}

/// Validates a request, loads its content through the loader matching the
/// URL and summarizes the result. Holds no per-request state.
pub struct Dispatcher<V, W, S> {
    video_loader: V,
    page_loader: W,
    summarizer: S,
    prompt: PromptTemplate,
}

impl<V, W, S> Dispatcher<V, W, S>
where
    V: ContentLoader,
    W: ContentLoader,
    S: Summarizer,
{
    pub fn new(video_loader: V, page_loader: W, summarizer: S) -> Self {
        Self {
            video_loader,
            page_loader,
            summarizer,
            prompt: PromptTemplate::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    pub async fn dispatch(&self, credential: &Credential, raw_url: &str) -> Result<Summary> {
        if credential.is_blank() || raw_url.trim().is_empty() {
            return Err(AppError::MissingInput);
        }

        let target = TargetUrl::parse(raw_url).ok_or(AppError::InvalidUrl)?;
        let kind = target.kind();
        tracing::info!(url = %target.url(), source = ?kind, "loading content");

        let documents = self.load(&target).await?;
        if documents.is_empty() {
            tracing::warn!(url = %target.url(), "loader returned no documents");
            return Err(AppError::EmptyContent);
        }

        let word_count: usize = documents
            .iter()
            .map(|doc| doc.page_content.split_whitespace().count())
            .sum();
        tracing::info!(documents = documents.len(), word_count, "summarizing content");

        let text = self
            .summarizer
            .summarize(credential, &self.prompt, &documents)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "summarization failed");
                AppError::SummarizationFailure(e.to_string())
            })?;

        Ok(Summary {
            url: raw_url.to_string(),
            source: kind,
            text,
            document_count: documents.len(),
            word_count,
        })
    }

    async fn load(&self, target: &TargetUrl) -> Result<Vec<Document>> {
        let result = match target {
            TargetUrl::Video(url) => self.video_loader.load(url).await.map_err(|e| e.to_string()),
            TargetUrl::Generic(url) => self.page_loader.load(url).await.map_err(|e| e.to_string()),
        };

        result.map_err(|message| {
            tracing::error!(url = %target.url(), error = %message, "loader failed");
            AppError::LoadFailure {
                kind: target.kind(),
                message,
            }
        })
    }
}
