//! Section location: finds labeled headings (French or English) and captures
//! everything up to the next recognized heading.
//!
//! A heading is a line made only of a known label, optionally followed by a
//! colon and inline content ("Compétences: Java, React"). Lines that merely
//! start with a label word ("Experience with Rust") stay in the body.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    /// Recognized only to end the previous section (languages, hobbies, …).
    Other,
}

const SUMMARY_LABELS: &str = r"résumé|resume|profil(?:e)?(?:\s+professionnel)?|summary|professional\s+summary|about(?:\s+me)?|à\s+propos(?:\s+de\s+moi)?|objecti(?:f|ve)";
const EXPERIENCE_LABELS: &str = r"expériences?(?:\s+professionnelles?)?|experiences?\s+professionnelles?|(?:work\s+|professional\s+)?experiences?|parcours(?:\s+professionnel)?|career(?:\s+history)?|employment(?:\s+history)?";
const EDUCATION_LABELS: &str = r"formations?|education|études|etudes|studies|parcours\s+(?:académique|scolaire)|academic\s+background|diplômes";
const SKILLS_LABELS: &str = r"compétences?(?:\s+(?:techniques|clés|professionnelles))?|(?:technical\s+|key\s+)?skills?|savoir-faire";
const PROJECTS_LABELS: &str = r"projets?(?:\s+(?:personnels?|professionnels?))?|(?:personal\s+|side\s+)?projects?|réalisations";
const OTHER_LABELS: &str = r"certifications?|langues|languages?|centres?\s+d['’]intérêts?|intérêts|interests|hobbies|loisirs|références|references|publications|récompenses|awards|bénévolat|volunteering";

static HEADINGS: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    [
        (SectionKind::Summary, SUMMARY_LABELS),
        (SectionKind::Experience, EXPERIENCE_LABELS),
        (SectionKind::Education, EDUCATION_LABELS),
        (SectionKind::Skills, SKILLS_LABELS),
        (SectionKind::Projects, PROJECTS_LABELS),
        (SectionKind::Other, OTHER_LABELS),
    ]
    .into_iter()
    .map(|(kind, labels)| {
        let pattern = format!(r"(?i)^\s*(?:{labels})\s*(?::\s*(.*))?$");
        (kind, Regex::new(&pattern).expect("Invalid section heading regex"))
    })
    .collect()
});

/// A bare document title ("CV", "Résumé") on top of the page. It reads like
/// the French summary label but opens nothing.
static DOCUMENT_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:cv|curriculum\s+vitae|r[ée]sum[ée])\s*$")
        .expect("Invalid document title regex")
});

pub fn is_heading(line: &str) -> bool {
    match_heading(line).is_some()
}

/// A heading line: which section it opens and any inline content after `:`.
fn match_heading(line: &str) -> Option<(SectionKind, &str)> {
    HEADINGS.iter().find_map(|(kind, re)| {
        re.captures(line).map(|caps| {
            let inline = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            (*kind, inline)
        })
    })
}

/// Text split into the header region (before any heading) and per-kind
/// section bodies. Repeated sections of the same kind are concatenated.
#[derive(Debug, Default)]
pub struct Sections {
    pub header: String,
    bodies: HashMap<SectionKind, String>,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.bodies
            .get(&kind)
            .map(String::as_str)
            .filter(|body| !body.trim().is_empty())
    }
}

pub fn split_sections(text: &str) -> Sections {
    let mut header: Vec<&str> = Vec::new();
    let mut bodies: HashMap<SectionKind, Vec<String>> = HashMap::new();
    let mut current: Option<(SectionKind, Vec<&str>)> = None;

    for line in text.lines() {
        let at_top = current.is_none() && header.iter().all(|l| l.trim().is_empty());
        if at_top && DOCUMENT_TITLE.is_match(line) {
            continue;
        }
        if let Some((kind, inline)) = match_heading(line) {
            match current.as_mut() {
                Some((open, lines)) if *open == kind => {
                    if !inline.is_empty() {
                        lines.push(inline);
                    }
                }
                _ => {
                    if let Some((open, lines)) = current.take() {
                        bodies.entry(open).or_default().push(lines.join("\n"));
                    }
                    let first = if inline.is_empty() { vec![] } else { vec![inline] };
                    current = Some((kind, first));
                }
            }
            continue;
        }

        match current.as_mut() {
            Some((_, lines)) => lines.push(line),
            None => header.push(line),
        }
    }

    if let Some((open, lines)) = current.take() {
        bodies.entry(open).or_default().push(lines.join("\n"));
    }

    Sections {
        header: header.join("\n").trim().to_string(),
        bodies: bodies
            .into_iter()
            .map(|(kind, parts)| {
                let body = parts
                    .iter()
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                (kind, body)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_does_not_open_summary() {
        let sections = split_sections("RESUME\nJohn Smith\njohn@example.com\n\nExperience\nDev at Acme");
        assert_eq!(sections.header, "John Smith\njohn@example.com");
        assert_eq!(sections.get(SectionKind::Summary), None);
        assert_eq!(sections.get(SectionKind::Experience), Some("Dev at Acme"));

        let sections = split_sections("Curriculum Vitae\nJane Doe");
        assert_eq!(sections.header, "Jane Doe");
    }

    #[test]
    fn test_resume_label_below_header_is_summary() {
        let sections = split_sections("Jane Doe\nRésumé\nBackend developer.");
        assert_eq!(sections.header, "Jane Doe");
        assert_eq!(sections.get(SectionKind::Summary), Some("Backend developer."));
    }

    #[test]
    fn test_heading_variants() {
        assert_eq!(match_heading("EXPÉRIENCE PROFESSIONNELLE").unwrap().0, SectionKind::Experience);
        assert_eq!(match_heading("Work Experience").unwrap().0, SectionKind::Experience);
        assert_eq!(match_heading("Formation :").unwrap().0, SectionKind::Education);
        assert_eq!(match_heading("Parcours académique").unwrap().0, SectionKind::Education);
        assert_eq!(match_heading("Technical Skills").unwrap().0, SectionKind::Skills);
        assert_eq!(match_heading("Projets personnels").unwrap().0, SectionKind::Projects);
        assert_eq!(match_heading("Langues").unwrap().0, SectionKind::Other);
        assert_eq!(match_heading("Profil").unwrap().0, SectionKind::Summary);
    }

    #[test]
    fn test_heading_with_inline_content() {
        let (kind, inline) = match_heading("Compétences: Java, React, Leadership").unwrap();
        assert_eq!(kind, SectionKind::Skills);
        assert_eq!(inline, "Java, React, Leadership");
    }

    #[test]
    fn test_sentence_starting_with_label_is_not_heading() {
        assert!(match_heading("Experience with distributed systems").is_none());
        assert!(match_heading("Project manager at Acme").is_none());
    }

    #[test]
    fn test_split_sections_bounds_each_capture() {
        let text = "Jane Doe\njane@example.com\n\nExperience\nDev at Acme\n\nOps at Beta\n\nEducation\nBSc in CS\n\nSkills\nRust, Go\n\nLanguages\nFrench";
        let sections = split_sections(text);
        assert_eq!(sections.header, "Jane Doe\njane@example.com");
        assert_eq!(
            sections.get(SectionKind::Experience),
            Some("Dev at Acme\n\nOps at Beta")
        );
        assert_eq!(sections.get(SectionKind::Education), Some("BSc in CS"));
        assert_eq!(sections.get(SectionKind::Skills), Some("Rust, Go"));
        assert_eq!(sections.get(SectionKind::Other), Some("French"));
        assert_eq!(sections.get(SectionKind::Projects), None);
    }

    #[test]
    fn test_repeated_heading_continues_section() {
        let sections = split_sections("Compétences\nCompétences: Java, React, Leadership");
        assert_eq!(sections.get(SectionKind::Skills), Some("Java, React, Leadership"));
    }

    #[test]
    fn test_no_headings_means_header_only() {
        let sections = split_sections("just some text\nwithout structure");
        assert_eq!(sections.header, "just some text\nwithout structure");
        assert!(sections.get(SectionKind::Experience).is_none());
    }

    #[test]
    fn test_empty_text() {
        let sections = split_sections("");
        assert_eq!(sections.header, "");
        assert!(sections.get(SectionKind::Skills).is_none());
    }
}
