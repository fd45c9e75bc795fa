//! The import pipeline: validate → detect format → extract text → detect
//! language → extract record → suggest improvements.
//!
//! Each run owns its intermediates and executes inside its own
//! `parse_resume` span, so concurrent uploads never share state and their
//! log lines can be told apart by `run_id`.

use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::models::resume::ResumeRecord;
use crate::parser::document::{validate, RawDocument};
use crate::parser::error::ParsingError;
use crate::parser::extract::{extractor_for, normalize_text};
use crate::parser::format::detect_format;
use crate::parser::heuristic::HeuristicExtractor;
use crate::parser::language::{detect_language, Language};
use crate::parser::llm_extractor::LlmExtractor;
use crate::parser::strategy::{ExtractionStrategy, RecordExtractor};
use crate::parser::suggestions::{generate_suggestions, SuggestionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    FileType,
    Extraction,
    Analysis,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsingProgress {
    pub stage: Stage,
    /// Percentage, non-decreasing within a run.
    pub progress: u8,
}

/// Progress observer. Invoked synchronously at each checkpoint; it cannot
/// influence the run.
pub type ProgressCallback<'a> = &'a (dyn Fn(ParsingProgress) + Send + Sync);

#[derive(Debug, Clone, Serialize)]
pub struct ParsingResult {
    pub data: ResumeRecord,
    pub language: Language,
    pub suggestions: SuggestionSet,
}

#[derive(Clone)]
pub struct ResumeParser {
    heuristic: HeuristicExtractor,
    llm: Option<LlmExtractor>,
    default_strategy: ExtractionStrategy,
}

impl ResumeParser {
    pub fn new(default_strategy: ExtractionStrategy, llm: Option<LlmExtractor>) -> Self {
        Self {
            heuristic: HeuristicExtractor,
            llm,
            default_strategy,
        }
    }

    pub fn default_strategy(&self) -> ExtractionStrategy {
        self.default_strategy
    }

    fn extractor(
        &self,
        strategy: Option<ExtractionStrategy>,
    ) -> Result<&dyn RecordExtractor, ParsingError> {
        match strategy.unwrap_or(self.default_strategy) {
            ExtractionStrategy::Heuristic => Ok(&self.heuristic),
            ExtractionStrategy::Llm => match &self.llm {
                Some(llm) => Ok(llm),
                None => Err(ParsingError::parsing(anyhow::anyhow!(
                    "LLM extraction requested but no completion service is configured"
                ))),
            },
        }
    }

    /// Runs the full pipeline on an uploaded file.
    pub async fn parse(
        &self,
        doc: RawDocument,
        strategy: Option<ExtractionStrategy>,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> Result<ParsingResult, ParsingError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("parse_resume", %run_id, name = %doc.filename, size = doc.size());
        self.run_document(doc, strategy, on_progress)
            .instrument(span)
            .await
    }

    async fn run_document(
        &self,
        doc: RawDocument,
        strategy: Option<ExtractionStrategy>,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> Result<ParsingResult, ParsingError> {
        let report = |stage: Stage, progress: u8| {
            debug!(?stage, progress, "Parsing progress");
            if let Some(callback) = on_progress {
                callback(ParsingProgress { stage, progress });
            }
        };
        info!("Résumé parsing started");

        validate(&doc)?;
        report(Stage::FileType, 25);

        let format = detect_format(&doc)?;
        report(Stage::Extraction, 50);

        let text = extractor_for(format).extract(&doc).await?;
        drop(doc);
        report(Stage::Analysis, 75);

        let language = detect_language(&text);
        let data = self.extractor(strategy)?.extract(&text, language).await?;
        report(Stage::Analysis, 90);

        let suggestions = generate_suggestions(&data, language);
        report(Stage::Complete, 100);

        info!("Résumé parsing finished");
        Ok(ParsingResult {
            data,
            language,
            suggestions,
        })
    }

    /// Runs the analysis half of the pipeline on text the caller already
    /// extracted. The language is detected unless given.
    pub async fn analyze_text(
        &self,
        text: &str,
        language: Option<Language>,
        strategy: Option<ExtractionStrategy>,
    ) -> Result<ParsingResult, ParsingError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("analyze_text", %run_id, text_length = text.len());
        self.run_text(text, language, strategy)
            .instrument(span)
            .await
    }

    async fn run_text(
        &self,
        text: &str,
        language: Option<Language>,
        strategy: Option<ExtractionStrategy>,
    ) -> Result<ParsingResult, ParsingError> {
        let text = normalize_text(text);
        let language = language.unwrap_or_else(|| detect_language(&text));
        let extractor = self.extractor(strategy)?;
        info!(%language, strategy = %extractor.strategy(), "Analysing résumé text");

        let data = extractor.extract(&text, language).await?;
        let suggestions = generate_suggestions(&data, language);
        Ok(ParsingResult {
            data,
            language,
            suggestions,
        })
    }
}
