//! Completeness hints for an extracted record, in the document's language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRecord;
use crate::parser::heuristic::patterns::char_len;
use crate::parser::language::Language;

const MIN_SUMMARY_CHARS: usize = 100;
const MIN_DESCRIPTION_CHARS: usize = 50;
const MIN_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    WorkExperience,
    Education,
    Skills,
    Projects,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::PersonalInfo,
        Section::WorkExperience,
        Section::Education,
        Section::Skills,
        Section::Projects,
    ];
}

/// Suggestions keyed by section. Every section key is present, possibly
/// with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SuggestionSet(BTreeMap<Section, Vec<String>>);

impl Default for SuggestionSet {
    fn default() -> Self {
        Self(Section::ALL.into_iter().map(|s| (s, Vec::new())).collect())
    }
}

impl SuggestionSet {
    pub fn get(&self, section: Section) -> &[String] {
        self.0.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    fn push(&mut self, section: Section, message: &str) {
        self.0.entry(section).or_default().push(message.to_string());
    }
}

struct Messages {
    summary: &'static str,
    experience_missing: &'static str,
    experience_detail: &'static str,
    education: &'static str,
    skills: &'static str,
    projects: &'static str,
}

const FRENCH: Messages = Messages {
    summary: "Ajoutez un résumé professionnel détaillé d'au moins 100 caractères.",
    experience_missing: "Ajoutez vos expériences professionnelles.",
    experience_detail: "Détaillez vos réalisations et responsabilités pour chaque expérience.",
    education: "Ajoutez votre parcours académique.",
    skills: "Ajoutez au moins 5 compétences principales.",
    projects: "Ajoutez des projets significatifs pour illustrer vos compétences.",
};

const ENGLISH: Messages = Messages {
    summary: "Add a detailed professional summary of at least 100 characters.",
    experience_missing: "Add your professional experiences.",
    experience_detail: "Detail your achievements and responsibilities for each experience.",
    education: "Add your academic background.",
    skills: "Add at least 5 main skills.",
    projects: "Add significant projects to showcase your skills.",
};

pub fn generate_suggestions(record: &ResumeRecord, language: Language) -> SuggestionSet {
    let msg = match language {
        Language::Fr => &FRENCH,
        Language::En => &ENGLISH,
    };
    let mut suggestions = SuggestionSet::default();

    if char_len(&record.personal_info.summary) < MIN_SUMMARY_CHARS {
        suggestions.push(Section::PersonalInfo, msg.summary);
    }

    if record.work_experience.is_empty() {
        suggestions.push(Section::WorkExperience, msg.experience_missing);
    } else if record
        .work_experience
        .iter()
        .any(|exp| char_len(&exp.description) < MIN_DESCRIPTION_CHARS)
    {
        suggestions.push(Section::WorkExperience, msg.experience_detail);
    }

    if record.education.is_empty() {
        suggestions.push(Section::Education, msg.education);
    }

    if record.skills.len() < MIN_SKILLS {
        suggestions.push(Section::Skills, msg.skills);
    }

    if record.projects.is_empty() {
        suggestions.push(Section::Projects, msg.projects);
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Project, Skill, WorkExperience};

    /// 150-character summary, three detailed jobs, two degrees, six skills
    /// and one project.
    fn complete_record() -> ResumeRecord {
        let mut record = ResumeRecord::default();
        record.personal_info.summary = "x".repeat(150);
        record.work_experience = ["Acme", "Initech", "Globex"]
            .into_iter()
            .map(|company| WorkExperience {
                position: "Engineer".to_string(),
                company: company.to_string(),
                description: "y".repeat(80),
                ..Default::default()
            })
            .collect();
        record.education = ["BSc", "MSc"]
            .into_iter()
            .map(|degree| Education {
                degree: degree.to_string(),
                ..Default::default()
            })
            .collect();
        record.skills = (0..6)
            .map(|i| Skill {
                name: format!("skill-{i}"),
                ..Default::default()
            })
            .collect();
        record.projects = vec![Project {
            name: "Planner".to_string(),
            ..Default::default()
        }];
        record
    }

    #[test]
    fn test_complete_record_has_no_suggestions() {
        let record = complete_record();
        assert_eq!(char_len(&record.personal_info.summary), 150);
        assert_eq!(record.work_experience.len(), 3);
        assert_eq!(record.education.len(), 2);

        let suggestions = generate_suggestions(&record, Language::En);
        assert!(suggestions.is_empty());
        for section in Section::ALL {
            assert!(suggestions.get(section).is_empty());
        }
    }

    #[test]
    fn test_empty_record_gets_one_suggestion_per_section() {
        let suggestions = generate_suggestions(&ResumeRecord::default(), Language::En);
        for section in Section::ALL {
            assert_eq!(suggestions.get(section).len(), 1, "{section:?}");
        }
        assert_eq!(
            suggestions.get(Section::WorkExperience)[0],
            "Add your professional experiences."
        );
    }

    #[test]
    fn test_short_description_asks_for_detail_once() {
        let mut record = complete_record();
        record.work_experience.push(WorkExperience::default());
        record.work_experience.push(WorkExperience::default());
        let suggestions = generate_suggestions(&record, Language::Fr);
        assert_eq!(
            suggestions.get(Section::WorkExperience),
            ["Détaillez vos réalisations et responsabilités pour chaque expérience."]
        );
    }

    #[test]
    fn test_summary_length_counts_characters() {
        let mut record = complete_record();
        record.personal_info.summary = "é".repeat(99);
        let suggestions = generate_suggestions(&record, Language::Fr);
        assert_eq!(suggestions.get(Section::PersonalInfo).len(), 1);
    }

    #[test]
    fn test_serializes_all_five_keys() {
        let value = serde_json::to_value(generate_suggestions(&complete_record(), Language::En))
            .unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["education", "personalInfo", "projects", "skills", "workExperience"]
        );
    }
}
