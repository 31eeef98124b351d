use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama3-8b-8192";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub llm_base_url: String,
    pub llm_model: String,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub request_timeout: Duration,
    pub transcript_languages: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "127.0.0.1");
        let port = get("PORT", "3000");
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let transcript_languages: Vec<String> = get("TRANSCRIPT_LANGUAGES", "en")
            .split(',')
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .collect();
        if transcript_languages.is_empty() {
            return Err(AppError::ConfigError("TRANSCRIPT_LANGUAGES is empty".to_string()));
        }

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            llm_base_url: get("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            llm_model: get("LLM_MODEL", DEFAULT_LLM_MODEL),
            fetch_timeout: seconds(&get("FETCH_TIMEOUT_SECS", "10"), "FETCH_TIMEOUT_SECS")?,
            llm_timeout: seconds(&get("LLM_TIMEOUT_SECS", "60"), "LLM_TIMEOUT_SECS")?,
            request_timeout: seconds(&get("REQUEST_TIMEOUT_SECS", "90"), "REQUEST_TIMEOUT_SECS")?,
            transcript_languages,
        })
    }
}

fn seconds(value: &str, key: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e)))
}
