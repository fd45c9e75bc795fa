use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::parser::strategy::ExtractionStrategy;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional second log sink (plain text, appended).
    pub log_file: Option<PathBuf>,
    pub extraction_strategy: ExtractionStrategy,
    /// Required only when `extraction_strategy` is `llm`.
    pub anthropic_api_key: Option<String>,
    pub llm_retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let extraction_strategy = match lookup("EXTRACTION_STRATEGY") {
            Some(raw) => raw
                .parse::<ExtractionStrategy>()
                .map_err(|e| anyhow!(e))
                .context("EXTRACTION_STRATEGY must be 'heuristic' or 'llm'")?,
            None => ExtractionStrategy::default(),
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|key| !key.trim().is_empty());
        if extraction_strategy == ExtractionStrategy::Llm && anthropic_api_key.is_none() {
            return Err(anyhow!(
                "Required environment variable 'ANTHROPIC_API_KEY' is not set (EXTRACTION_STRATEGY=llm)"
            ));
        }

        let max_attempts = match lookup("LLM_MAX_ATTEMPTS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?,
            None => DEFAULT_MAX_ATTEMPTS,
        };
        let delay = match lookup("LLM_RETRY_DELAY_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("LLM_RETRY_DELAY_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_RETRY_DELAY,
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_file: lookup("LOG_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            extraction_strategy,
            anthropic_api_key,
            llm_retry: RetryPolicy {
                max_attempts,
                delay,
            },
        })
    }
}
