use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static FRENCH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)expérience|formation|compétence|projet|études|diplôme|développeu|ingénieu")
        .expect("Invalid French keyword regex")
});

static ENGLISH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)experience|education|skill|project|degree|developer|engineer")
        .expect("Invalid English keyword regex")
});

/// Keyword-frequency vote between French and English résumé vocabulary.
/// Ties go to French.
pub fn detect_language(text: &str) -> Language {
    let french_matches = FRENCH_KEYWORDS.find_iter(text).count();
    let english_matches = ENGLISH_KEYWORDS.find_iter(text).count();

    let language = if french_matches >= english_matches {
        Language::Fr
    } else {
        Language::En
    };
    info!(
        %language,
        french_matches, english_matches, "Language detected"
    );
    language
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_french() {
        let text = "EXPÉRIENCE PROFESSIONNELLE\nDéveloppeur chez Acme\n\nFORMATION\nDiplôme d'ingénieur";
        assert_eq!(detect_language(text), Language::Fr);
    }

    #[test]
    fn test_detects_english() {
        let text = "Work Experience\nSoftware Engineer at Acme\n\nEducation\nDegree in CS\n\nSkills\nRust";
        assert_eq!(detect_language(text), Language::En);
    }

    #[test]
    fn test_tie_goes_to_french() {
        assert_eq!(detect_language(""), Language::Fr);
        assert_eq!(detect_language("Projet / Project"), Language::Fr);
    }

    #[test]
    fn test_counts_every_occurrence() {
        let text = "Formation. Project one. Project two.";
        assert_eq!(detect_language(text), Language::En);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "Compétences: Java, React. Experience: Engineer at Foo.";
        let first = detect_language(text);
        for _ in 0..10 {
            assert_eq!(detect_language(text), first);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::Fr);
    }
}
