//! LLM-assisted extraction. Sends the document text to a `CompletionService`
//! and decodes the JSON reply into a `ResumeRecord`. The reply replaces the
//! heuristic result wholesale; the two are never merged.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{JSON_ONLY_EN, JSON_ONLY_FR};
use crate::llm_client::{strip_json_fences, CompletionRequest, CompletionService};
use crate::models::resume::lenient::value_to_string;
use crate::models::resume::{ResumeRecord, Skill, SkillCategory, SkillLevel};
use crate::parser::error::ParsingError;
use crate::parser::language::Language;
use crate::parser::prompts::{
    EXTRACT_PROMPT_EN, EXTRACT_PROMPT_FR, EXTRACT_SYSTEM_EN, EXTRACT_SYSTEM_FR,
};

/// Characters of a rejected reply echoed back in the error details.
const PREVIEW_CHARS: usize = 200;

const SOFT_MARKERS: [&str; 5] = [
    "soft",
    "comportement",
    "savoir-être",
    "humain",
    "interpersonnel",
];
const TOOL_MARKERS: [&str; 2] = ["tool", "outil"];

#[derive(Clone)]
pub struct LlmExtractor {
    service: Arc<dyn CompletionService>,
}

impl LlmExtractor {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    pub async fn extract_record(
        &self,
        text: &str,
        language: Language,
    ) -> Result<ResumeRecord, ParsingError> {
        let request = build_request(text, language);
        info!(%language, text_length = text.len(), "Requesting completion for résumé extraction");

        let reply = self.service.complete(&request).await.map_err(|e| {
            warn!(error = %e, "Completion service call failed");
            ParsingError::from(e)
        })?;
        debug!(reply_length = reply.len(), "Completion reply received");

        decode_reply(&reply)
    }
}

/// Language-specific instruction pair with the document text interpolated.
pub fn build_request(text: &str, language: Language) -> CompletionRequest {
    let (system, prompt, json_only) = match language {
        Language::Fr => (EXTRACT_SYSTEM_FR, EXTRACT_PROMPT_FR, JSON_ONLY_FR),
        Language::En => (EXTRACT_SYSTEM_EN, EXTRACT_PROMPT_EN, JSON_ONLY_EN),
    };
    CompletionRequest {
        system_instruction: format!("{system}\n\n{json_only}"),
        user_instruction: prompt.replace("{text}", text),
    }
}

/// Reply text to record: fences stripped, shape checked before decoding,
/// skills flattened, every other section decoded leniently.
pub fn decode_reply(reply: &str) -> Result<ResumeRecord, ParsingError> {
    let body = strip_json_fences(reply);
    if !body.starts_with('{') {
        warn!("Completion reply is not a JSON object");
        return Err(ParsingError::InvalidResponseFormat {
            preview: body.chars().take(PREVIEW_CHARS).collect(),
        });
    }

    let mut value: Value = serde_json::from_str(body)?;
    let skills = value
        .as_object_mut()
        .and_then(|object| object.remove("skills"))
        .map(normalize_skills)
        .unwrap_or_default();

    let mut record: ResumeRecord = serde_json::from_value(value)?;
    record.skills = skills;
    info!(
        work_experience = record.work_experience.len(),
        education = record.education.len(),
        skills = record.skills.len(),
        projects = record.projects.len(),
        "Completion reply decoded"
    );
    Ok(record)
}

/// Accepts a flat list or a mapping from category name to list and returns
/// one flat list. A skill's own `category` wins over its group key.
fn normalize_skills(value: Value) -> Vec<Skill> {
    match value {
        Value::Array(items) => items.iter().filter_map(|item| skill_from(item, None)).collect(),
        Value::Object(groups) => groups
            .iter()
            .flat_map(|(group, items)| match items {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| skill_from(item, Some(group.as_str())))
                    .collect::<Vec<_>>(),
                Value::String(names) => names
                    .split([',', ';'])
                    .filter_map(|name| {
                        skill_from(&Value::String(name.to_string()), Some(group.as_str()))
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn skill_from(item: &Value, group: Option<&str>) -> Option<Skill> {
    let (name, category, level) = match item {
        Value::String(name) => (name.trim().to_string(), String::new(), String::new()),
        Value::Object(fields) => (
            fields.get("name").map(value_to_string).unwrap_or_default(),
            fields.get("category").map(value_to_string).unwrap_or_default(),
            fields.get("level").map(value_to_string).unwrap_or_default(),
        ),
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }

    let category_text = if category.is_empty() {
        group.unwrap_or("")
    } else {
        category.as_str()
    };
    Some(Skill {
        name,
        level: SkillLevel::from_label(&level),
        category: category_from_text(category_text),
    })
}

/// Substring match on the free-text category; anything unrecognized is
/// treated as technical.
pub fn category_from_text(text: &str) -> SkillCategory {
    let lower = text.to_lowercase();
    if SOFT_MARKERS.iter().any(|m| lower.contains(m)) {
        SkillCategory::Soft
    } else if TOOL_MARKERS.iter().any(|m| lower.contains(m)) {
        SkillCategory::Tools
    } else {
        SkillCategory::Technical
    }
}
