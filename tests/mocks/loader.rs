use std::sync::{Arc, Mutex};
use url::Url;
use url_summarizer::loader::{ContentLoader, Document};

#[derive(Clone, Default)]
pub struct MockLoader {
    pub documents: Vec<Document>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockLoader {
    pub fn returning(texts: &[&str]) -> Self {
        Self {
            documents: texts.iter().map(|t| Document::new(*t)).collect(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }
}

impl ContentLoader for MockLoader {
    type Error = anyhow::Error;

    async fn load(&self, url: &Url) -> Result<Vec<Document>, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.documents.clone())
    }
}
