use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{Skill, SkillCategory, SkillLevel};

/// Keyword families, checked in order; the first hit decides the category.
static FAMILIES: Lazy<Vec<(SkillCategory, Regex)>> = Lazy::new(|| {
    [
        // Programming languages
        (
            SkillCategory::Technical,
            r"(?i)^(?:java|python|javascript|js|typescript|ts|c|c\+\+|c#|\.net|php|ruby|swift|kotlin|go|golang|rust|scala|r|perl|dart|html5?|css3?|sass|bash|shell|matlab)$",
        ),
        // Frameworks and libraries
        (
            SkillCategory::Technical,
            r"(?i)\b(?:react(?:\.js)?|angular(?:js)?|vue(?:\.js)?|svelte|next\.js|node(?:\.js)?|express|spring(?:\s+boot)?|django|flask|fastapi|laravel|symfony|rails|flutter|react\s+native|jquery|bootstrap|tailwind|tensorflow|pytorch|pandas|graphql)\b",
        ),
        // Databases
        (
            SkillCategory::Technical,
            r"(?i)\b(?:sql|mysql|postgres(?:ql)?|sqlite|mongodb|mongo|oracle|redis|elasticsearch|cassandra|mariadb|dynamodb|firebase)\b",
        ),
        (
            SkillCategory::Tools,
            r"(?i)\b(?:git|github|gitlab|docker|kubernetes|k8s|jenkins|terraform|ansible|aws|azure|gcp|linux|unix|jira|confluence|figma|photoshop|excel|word|powerpoint|vs\s*code|intellij|postman|webpack|npm|ci/cd)\b",
        ),
        (
            SkillCategory::Soft,
            r"(?i)leadership|communication|teamwork|team\s*work|travail\s+en\s+équipe|esprit\s+d['’]équipe|management|gestion\s+d['’]équipe|agile|scrum|problem[-\s]solving|résolution\s+de\s+problèmes|autonomie|autonomy|rigueur|adaptabilit|créativité|creativity|organisation|organization|curiosité|curiosity|empathie|empathy|négociation|negotiation|prise\s+de\s+parole|public\s+speaking",
        ),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        (category, Regex::new(pattern).expect("Invalid skill family regex"))
    })
    .collect()
});

/// "Langages: Java" style prefixes inside a skills block.
static LINE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[^\n:,;]{1,40}:\s+").expect("Invalid skill label regex"));

static TOKEN_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n•·|]").expect("Invalid skill split regex"));

const MAX_SKILL_CHARS: usize = 50;

pub fn classify(name: &str) -> SkillCategory {
    FAMILIES
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(category, _)| *category)
        .unwrap_or(SkillCategory::Other)
}

/// Tokenizes a skills block and classifies every token. Duplicates
/// (case-insensitive) keep their first occurrence.
pub fn parse_skills(body: &str) -> Vec<Skill> {
    let unlabeled = LINE_LABEL.replace_all(body, "");
    let mut seen = std::collections::HashSet::new();

    TOKEN_SPLIT
        .split(&unlabeled)
        .map(|token| {
            token
                .trim_matches(|c: char| c.is_whitespace() || "-–—*▪.".contains(c))
                .to_string()
        })
        .filter(|name| !name.is_empty() && name.chars().count() <= MAX_SKILL_CHARS)
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(|name| Skill {
            category: classify(&name),
            level: SkillLevel::Intermediate,
            name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_categories(skills: &[Skill]) -> Vec<(&str, SkillCategory)> {
        skills.iter().map(|s| (s.name.as_str(), s.category)).collect()
    }

    #[test]
    fn test_inline_french_skills() {
        let skills = parse_skills("Java, React, Leadership");
        assert_eq!(
            names_and_categories(&skills),
            vec![
                ("Java", SkillCategory::Technical),
                ("React", SkillCategory::Technical),
                ("Leadership", SkillCategory::Soft),
            ]
        );
        assert!(skills.iter().all(|s| s.level == SkillLevel::Intermediate));
    }

    #[test]
    fn test_labeled_lines_and_bullets() {
        let body = "Langages: Python; C++\nOutils: Docker, Git\n• Travail en équipe\n- Cuisine";
        let skills = parse_skills(body);
        assert_eq!(
            names_and_categories(&skills),
            vec![
                ("Python", SkillCategory::Technical),
                ("C++", SkillCategory::Technical),
                ("Docker", SkillCategory::Tools),
                ("Git", SkillCategory::Tools),
                ("Travail en équipe", SkillCategory::Soft),
                ("Cuisine", SkillCategory::Other),
            ]
        );
    }

    #[test]
    fn test_classify_families() {
        assert_eq!(classify("PostgreSQL"), SkillCategory::Technical);
        assert_eq!(classify("Spring Boot"), SkillCategory::Technical);
        assert_eq!(classify("Kubernetes"), SkillCategory::Tools);
        assert_eq!(classify("Problem solving"), SkillCategory::Soft);
        assert_eq!(classify("Javanese cooking"), SkillCategory::Other);
    }

    #[test]
    fn test_duplicates_and_empty_tokens_dropped() {
        let skills = parse_skills("Rust,, rust ; ;Go");
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "Rust");
        assert_eq!(skills[1].name, "Go");
    }
}
