use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::parser::document::RawDocument;
use crate::parser::language::Language;
use crate::parser::pipeline::ParsingResult;
use crate::parser::strategy::ExtractionStrategy;
use crate::parser::suggestions::{generate_suggestions, SuggestionSet};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct StrategyQuery {
    pub strategy: Option<ExtractionStrategy>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    pub language: Option<Language>,
    pub strategy: Option<ExtractionStrategy>,
}

#[derive(Deserialize)]
pub struct SuggestionsRequest {
    pub data: ResumeRecord,
    #[serde(default)]
    pub language: Language,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Query(query): Query<StrategyQuery>,
    mut multipart: Multipart,
) -> Result<Json<ParsingResult>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some(RawDocument::new(filename, bytes));
        break;
    }

    let doc = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;
    info!(name = %doc.filename, size = doc.size(), "Résumé upload received");

    let result = state.parser.parse(doc, query.strategy, None).await?;
    Ok(Json(result))
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ParsingResult>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let result = state
        .parser
        .analyze_text(&req.text, req.language, req.strategy)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/resumes/suggestions
pub async fn handle_suggestions(Json(req): Json<SuggestionsRequest>) -> Json<SuggestionSet> {
    Json(generate_suggestions(&req.data, req.language))
}
