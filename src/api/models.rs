use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::dispatch::Summary;
use crate::target::UrlKind;

/// Form submission. Absent or null fields count as blank.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SummarizeRequest {
    pub api_key: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub source: UrlKind,
    pub summary: String,
    pub document_count: usize,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
}

impl From<Summary> for SummarizeResponse {
    fn from(summary: Summary) -> Self {
        SummarizeResponse {
            url: summary.url,
            source: summary.source,
            summary: summary.text,
            document_count: summary.document_count,
            word_count: summary.word_count,
            summarized_at: Utc::now(),
        }
    }
}
