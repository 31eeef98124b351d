pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod loader;
pub mod scraper;
pub mod target;
pub mod youtube;

use std::sync::Arc;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{AppError, Result};
use crate::llm::ChatSummarizer;
use crate::loader::http_client;
use crate::scraper::WebPageLoader;
use crate::youtube::YoutubeLoader;

pub type SummaryDispatcher = Dispatcher<YoutubeLoader, WebPageLoader, ChatSummarizer>;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<SummaryDispatcher>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let client_error = |e: reqwest::Error| {
            AppError::ConfigError(format!("Failed to build HTTP client: {}", e))
        };

        let fetch_client = http_client(config.fetch_timeout).map_err(client_error)?;
        let llm_client = http_client(config.llm_timeout).map_err(client_error)?;

        let dispatcher = Dispatcher::new(
            YoutubeLoader::new(fetch_client.clone(), config.transcript_languages.clone()),
            WebPageLoader::new(fetch_client),
            ChatSummarizer::new(llm_client, &config.llm_base_url, &config.llm_model),
        );

        Ok(AppState {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        })
    }
}
