//! Rule-based extraction: locate labeled sections, then parse each one with
//! pattern heuristics. Best effort; it never fails, and anything it cannot
//! recognize is left at its empty default.

pub mod entries;
pub mod patterns;
pub mod personal;
pub mod sections;
pub mod skills;

use tracing::info;

use crate::models::resume::ResumeRecord;
use crate::parser::extract::normalize_text;
use sections::{split_sections, SectionKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn extract_record(&self, text: &str) -> ResumeRecord {
        let text = normalize_text(text);
        let sections = split_sections(&text);

        let record = ResumeRecord {
            personal_info: personal::parse_personal_info(
                &text,
                &sections.header,
                sections.get(SectionKind::Summary),
            ),
            work_experience: sections
                .get(SectionKind::Experience)
                .map(entries::parse_experience)
                .unwrap_or_default(),
            education: sections
                .get(SectionKind::Education)
                .map(entries::parse_education)
                .unwrap_or_default(),
            skills: sections
                .get(SectionKind::Skills)
                .map(skills::parse_skills)
                .unwrap_or_default(),
            projects: sections
                .get(SectionKind::Projects)
                .map(entries::parse_projects)
                .unwrap_or_default(),
        };

        info!(
            work_experience = record.work_experience.len(),
            education = record.education.len(),
            skills = record.skills.len(),
            projects = record.projects.len(),
            "Heuristic extraction finished"
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{SkillCategory, SkillLevel};

    const FRENCH_RESUME: &str = "Marie Dupont
marie.dupont@example.fr - 06 12 34 56 78

Profil
Développeuse backend passionnée par les systèmes distribués.

EXPÉRIENCE PROFESSIONNELLE
Développeuse Rust chez Acme | Janvier 2021 - Présent
- Conception d'une API de facturation
- Migration vers Kubernetes

Stagiaire Data - Beta Corp
Juin 2019 - Août 2020

FORMATION
Master en Informatique - Université de Lyon
2017 - 2019

Compétences
Compétences: Java, React, Leadership

Projets
Planner - Application de planning
Stack: Rust, Axum
https://github.com/marie/planner

Langues
Anglais courant";

    #[test]
    fn test_french_skills_line() {
        let record = HeuristicExtractor.extract_record("Compétences\nCompétences: Java, React, Leadership");
        assert_eq!(record.skills.len(), 3);
        let by_name = |name: &str| record.skills.iter().find(|s| s.name == name).unwrap();
        assert_eq!(by_name("Java").category, SkillCategory::Technical);
        assert_eq!(by_name("React").category, SkillCategory::Technical);
        assert_eq!(by_name("Leadership").category, SkillCategory::Soft);
        assert!(record.skills.iter().all(|s| s.level == SkillLevel::Intermediate));
    }

    #[test]
    fn test_full_french_resume() {
        let record = HeuristicExtractor.extract_record(FRENCH_RESUME);

        let info = &record.personal_info;
        assert_eq!(info.first_name, "Marie");
        assert_eq!(info.last_name, "Dupont");
        assert_eq!(info.email, "marie.dupont@example.fr");
        assert_eq!(info.phone, "06 12 34 56 78");
        assert_eq!(
            info.summary,
            "Développeuse backend passionnée par les systèmes distribués."
        );

        assert_eq!(record.work_experience.len(), 2);
        let first = &record.work_experience[0];
        assert_eq!(first.position, "Développeuse Rust");
        assert_eq!(first.company, "Acme");
        assert!(first.current);
        assert_eq!(first.start_date, "Janvier 2021");
        let second = &record.work_experience[1];
        assert_eq!(second.company, "Beta Corp");
        assert_eq!(second.end_date, "Août 2020");

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].degree, "Master");
        assert_eq!(record.education[0].school, "Université de Lyon");

        assert_eq!(record.skills.len(), 3);

        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].name, "Planner");
        assert_eq!(record.projects[0].technologies, vec!["Rust", "Axum"]);
    }

    #[test]
    fn test_document_title_keeps_contact_header() {
        for title in ["RESUME", "Résumé", "CV"] {
            let text = format!(
                "{title}\nJohn Smith\njohn@example.com\n\nExperience\nDeveloper at Acme\n2019 - 2021"
            );
            let record = HeuristicExtractor.extract_record(&text);
            assert_eq!(record.personal_info.first_name, "John", "{title}");
            assert_eq!(record.personal_info.last_name, "Smith");
            assert_eq!(record.personal_info.email, "john@example.com");
            assert_eq!(record.personal_info.summary, "");
            assert_eq!(record.work_experience.len(), 1);
        }
    }

    #[test]
    fn test_dated_first_line_experience_is_kept() {
        let record = HeuristicExtractor.extract_record(
            "Experience\nJan 2020 - Present\nSenior Developer at Acme\nBuilt things.",
        );
        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.work_experience[0].position, "Senior Developer");
        assert!(record.work_experience[0].current);
    }

    #[test]
    fn test_project_without_url_serializes_empty_link() {
        let record = HeuristicExtractor.extract_record("Projects\nPlanner - scheduling app");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["projects"][0]["name"], "Planner");
        assert_eq!(value["projects"][0]["link"], "");
    }

    #[test]
    fn test_empty_text_returns_full_default_record() {
        let record = HeuristicExtractor.extract_record("");
        assert_eq!(record, ResumeRecord::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in ["personalInfo", "workExperience", "education", "skills", "projects"] {
            assert!(value.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_unstructured_text_never_fails() {
        let record = HeuristicExtractor.extract_record("lorem ipsum\n\n\n2020 ---- |||| ::::");
        assert!(record.work_experience.is_empty());
        assert!(record.skills.is_empty());
    }
}
