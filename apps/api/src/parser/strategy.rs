//! Record extraction strategies behind one trait, so the pipeline runs the
//! heuristic and LLM-assisted passes through the same call.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRecord;
use crate::parser::error::ParsingError;
use crate::parser::heuristic::HeuristicExtractor;
use crate::parser::language::Language;
use crate::parser::llm_extractor::LlmExtractor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    #[default]
    Heuristic,
    Llm,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Heuristic => "heuristic",
            ExtractionStrategy::Llm => "llm",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" => Ok(ExtractionStrategy::Heuristic),
            "llm" => Ok(ExtractionStrategy::Llm),
            other => Err(format!(
                "unknown extraction strategy '{other}' (expected 'heuristic' or 'llm')"
            )),
        }
    }
}

/// Turns normalized document text into a structured record.
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    async fn extract(&self, text: &str, language: Language)
        -> Result<ResumeRecord, ParsingError>;

    fn strategy(&self) -> ExtractionStrategy;
}

#[async_trait]
impl RecordExtractor for HeuristicExtractor {
    async fn extract(
        &self,
        text: &str,
        _language: Language,
    ) -> Result<ResumeRecord, ParsingError> {
        Ok(self.extract_record(text))
    }

    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Heuristic
    }
}

#[async_trait]
impl RecordExtractor for LlmExtractor {
    async fn extract(&self, text: &str, language: Language) -> Result<ResumeRecord, ParsingError> {
        self.extract_record(text, language).await
    }

    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Llm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("LLM".parse::<ExtractionStrategy>().unwrap(), ExtractionStrategy::Llm);
        assert_eq!(
            " heuristic ".parse::<ExtractionStrategy>().unwrap(),
            ExtractionStrategy::Heuristic
        );
        assert!("gpt".parse::<ExtractionStrategy>().is_err());
    }

    #[test]
    fn test_strategy_serde_lowercase() {
        assert_eq!(serde_json::to_value(ExtractionStrategy::Llm).unwrap(), "llm");
        let parsed: ExtractionStrategy = serde_json::from_str("\"heuristic\"").unwrap();
        assert_eq!(parsed, ExtractionStrategy::Heuristic);
    }

    #[tokio::test]
    async fn test_heuristic_strategy_never_fails() {
        let extractor: &dyn RecordExtractor = &HeuristicExtractor;
        let record = extractor.extract("", Language::En).await.unwrap();
        assert_eq!(record, ResumeRecord::default());
        assert_eq!(extractor.strategy(), ExtractionStrategy::Heuristic);
    }
}
