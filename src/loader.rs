use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use url::Url;

const USER_AGENT: &str = concat!("url-summarizer/", env!("CARGO_PKG_VERSION"));

/// One unit of extracted text plus whatever the loader knows about its origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Turns a URL into documents. An empty vector means the source had nothing
/// to extract; errors are reserved for failures to reach or read it.
pub trait ContentLoader {
    type Error: std::fmt::Display;

    fn load(&self, url: &Url) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("unsupported content type: {0}")]
    UnsupportedContent(String),

    #[error("could not determine a video id from {0}")]
    InvalidVideoUrl(String),

    #[error("video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("could not read the player response for video {0}")]
    PlayerResponse(String),

    #[error(
        "no transcript for video {video_id} in the requested languages (available: {available})"
    )]
    NoTranscript { video_id: String, available: String },
}

/// Shared outbound client; built once at startup so connections are pooled.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
}
