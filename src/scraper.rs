use once_cell::sync::Lazy;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::loader::{ContentLoader, Document, LoaderError};

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, pre, blockquote, td, th, dt, dd, figcaption")
        .expect("Failed to parse block selector")
});

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Loads the readable text of a generic web page as a single document.
#[derive(Clone)]
pub struct WebPageLoader {
    client: Client,
}

impl WebPageLoader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &Url) -> Result<(String, String), LoaderError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        let body = response.text().await?;
        Ok((content_type, body))
    }
}

impl ContentLoader for WebPageLoader {
    type Error = LoaderError;

    async fn load(&self, url: &Url) -> Result<Vec<Document>, LoaderError> {
        let (content_type, body) = self.fetch(url).await?;
        tracing::debug!(%url, %content_type, bytes = body.len(), "fetched page");

        let (text, title) = if content_type.contains("html") {
            let page = extract_page(&body);
            (page.text, page.title)
        } else if content_type.starts_with("text/") {
            (body.trim().to_string(), None)
        } else {
            return Err(LoaderError::UnsupportedContent(content_type));
        };

        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut doc = Document::new(text).with_metadata("source", url.as_str());
        if let Some(title) = title {
            doc = doc.with_metadata("title", title);
        }
        Ok(vec![doc])
    }
}

pub struct ExtractedPage {
    pub title: Option<String>,
    pub text: String,
}

/// Pulls the title and block-level text out of an HTML document.
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| collapse_whitespace(&visible_text(el)))
        .filter(|t| !t.is_empty());

    let blocks: Vec<String> = document
        .select(&BLOCK_SELECTOR)
        .filter(|el| !has_block_ancestor(el))
        .map(|el| collapse_whitespace(&visible_text(el)))
        .filter(|t| !t.is_empty())
        .collect();

    let text = if blocks.is_empty() {
        document
            .select(&BODY_SELECTOR)
            .next()
            .map(|body| format_text(&visible_text(body)))
            .unwrap_or_default()
    } else {
        blocks.join("\n\n")
    };

    ExtractedPage { title, text }
}

fn has_block_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BLOCK_SELECTOR.matches(&ancestor))
}

fn is_skipped(element: &ElementRef) -> bool {
    SKIPPED_TAGS.contains(&element.value().name())
}

/// Text of an element, ignoring script-like subtrees.
fn visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| is_skipped(&ancestor));
            if !hidden {
                out.push_str(text);
            }
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trims every line and drops blank ones.
pub fn format_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = collapse_whitespace(line);
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&trimmed);
        }
    }

    result
}
