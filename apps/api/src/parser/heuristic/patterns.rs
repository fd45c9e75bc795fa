//! Compiled patterns shared by the per-section parsers.

use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: &str = "janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre|\
january|february|march|april|may|june|july|august|september|october|november|december|\
janv|févr|fév|avr|juil|sept|déc|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

/// A year token, optionally preceded by a month name (either language) or
/// a numeric month (`09/2021`).
pub static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:(?:{MONTHS})\.?\s+|\d{{1,2}}[/.])?(?:19|20)\d{{2}}\b"
    ))
    .expect("Invalid date regex")
});

/// Markers for an ongoing position or course.
pub static CURRENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:présent|present|en\s+cours|actuellement|actuel|aujourd['’]hui|à\s+ce\s+jour|current(?:ly)?|now|ongoing)\b",
    )
    .expect("Invalid current regex")
});

/// Field separators inside a heading line: spaced dashes, pipes, bullets
/// and colons followed by whitespace. Hyphens inside words are kept.
pub static SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+[-–—]\s+|[–—]|\s*[|•·]\s*|:(?:\s+|$)").expect("Invalid separator regex")
});

/// Affiliation connector followed by the organisation name.
pub static EMPLOYER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s,(])(?:chez|at|@|pour|for|à)\s+([^,\n|•]+)")
        .expect("Invalid employer regex")
});

pub static SCHOOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s,(])(?:à|at|@)\s+([^,\n|•]+)").expect("Invalid school regex")
});

/// Words that usually name a school when no connector introduces it.
pub static SCHOOL_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)universit|école|ecole|school|college|collège|institut|lycée|lycee|faculté|academy|académie|\biut\b|\binsa\b|polytechn",
    )
    .expect("Invalid school hint regex")
});

pub static DEGREE_FIELD_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:en|in)\s+").expect("Invalid degree split regex"));

pub static TECHNOLOGIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:technologies?|technos?|stack|outils?|tools?)\s*[:\-]\s*([^\n]+)")
        .expect("Invalid technologies regex")
});

pub static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhttps?://[^\s,)]+|\b(?:github|gitlab)\.com/[^\s,)]+")
        .expect("Invalid link regex")
});

/// Blank-line entry boundary.
pub static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[^\S\n]*\n").expect("Invalid blank line regex"));

static EDGE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[\s\-–—|:,;•·()/]+|\b(?:de|du|à|au|from|to|since|depuis|until|jusqu['’]à)\b)+|(?:[\s\-–—|:,;•·()/]+|\b(?:de|du|à|au|from|to|since|depuis|until|jusqu['’]à)\b)+$",
    )
    .expect("Invalid edge noise regex")
});

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").expect("Invalid spaces regex"));

/// Trims separators, brackets and dangling date connectors ("de", "to", …)
/// from both ends of a fragment and collapses inner spaces.
pub fn clean_fragment(fragment: &str) -> String {
    let collapsed = SPACES.replace_all(fragment, " ");
    EDGE_NOISE.replace_all(collapsed.trim(), "").trim().to_string()
}

/// Removes date and current-position markers from `text`.
pub fn strip_dates(text: &str) -> String {
    let without_dates = DATE.replace_all(text, " ");
    CURRENT.replace_all(&without_dates, " ").into_owned()
}

/// Strips bullets and separator debris from each description line and drops
/// the empty ones. Inner punctuation is kept.
pub fn clean_description(text: &str) -> String {
    text.lines()
        .map(|line| {
            let collapsed = SPACES.replace_all(line, " ");
            collapsed
                .trim_matches(|c: char| c.is_whitespace() || "-–—•·*▪|,;".contains(c))
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
