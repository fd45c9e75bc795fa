use crate::parser::pipeline::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless between runs; cloning shares the completion client.
    pub parser: ResumeParser,
}
