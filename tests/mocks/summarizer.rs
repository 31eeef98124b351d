use std::sync::{Arc, Mutex};
use url_summarizer::llm::{Credential, PromptTemplate, Summarizer};
use url_summarizer::loader::Document;

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    /// Rendered prompts, one per call.
    pub calls: Arc<Mutex<Vec<String>>>,
    pub credentials: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            credentials: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn summarize(
        &self,
        credential: &Credential,
        prompt: &PromptTemplate,
        documents: &[Document],
    ) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(prompt.stuff(documents));
        self.credentials
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.summary.clone())
    }
}
