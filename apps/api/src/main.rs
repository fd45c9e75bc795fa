mod config;
mod errors;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionService, LlmClient};
use crate::parser::llm_extractor::LlmExtractor;
use crate::parser::pipeline::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Console logging, plus a plain-text file sink when LOG_FILE is set
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open LOG_FILE {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    info!("Starting cvparse API v{}", env!("CARGO_PKG_VERSION"));

    // LLM extraction is available only when an API key is configured
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_retry)?;
            info!(
                model = llm_client::MODEL,
                max_attempts = config.llm_retry.max_attempts,
                "LLM client initialized"
            );
            let service: Arc<dyn CompletionService> = Arc::new(client);
            Some(LlmExtractor::new(service))
        }
        None => {
            info!("No ANTHROPIC_API_KEY set; LLM extraction disabled");
            None
        }
    };

    let state = AppState {
        parser: ResumeParser::new(config.extraction_strategy, llm),
    };
    info!(strategy = %config.extraction_strategy, "Résumé parser ready");

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
