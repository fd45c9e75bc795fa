pub mod document;
pub mod error;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod heuristic;
pub mod language;
pub mod llm_extractor;
pub mod pipeline;
pub mod prompts;
pub mod strategy;
pub mod suggestions;
