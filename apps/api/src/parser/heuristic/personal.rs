use once_cell::sync::Lazy;
use regex::Regex;

use super::sections::is_heading;
use crate::models::resume::PersonalInfo;

/// Lines searched for a name when the header has none.
const NAME_SCAN_LINES: usize = 5;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("Invalid email regex")
});

/// French numbers: `06 12 34 56 78`, `+33 6 12 34 56 78`, `0033 (0)6…`.
static PHONE_FR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(?:\+|00)33\s*(?:\(0\)\s*)?|\b0)[1-9](?:[\s.-]*\d{2}){4}\b")
        .expect("Invalid phone regex")
});

static PHONE_INTL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+\d{1,3}(?:[\s.-]*\(?\d{1,4}\)?){2,5}").expect("Invalid phone regex")
});

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\p{Lu}[\p{Ll}'’-]+)\s+(\p{Lu}[\p{L}'’-]+)\b").expect("Invalid name regex")
});

static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:adresse|address)\s*:\s*([^\n]+)").expect("Invalid address regex")
});

fn find_name<'a>(lines: impl Iterator<Item = &'a str>) -> Option<(String, String)> {
    lines
        .filter(|line| !EMAIL.is_match(line))
        .find_map(|line| NAME.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Reads contact details from the whole text and the name from the header
/// region, falling back to the first non-heading lines of the text.
/// `summary` is the profile section body, if any.
pub fn parse_personal_info(text: &str, header: &str, summary: Option<&str>) -> PersonalInfo {
    let (first_name, last_name) = find_name(header.lines())
        .or_else(|| {
            find_name(
                text.lines()
                    .filter(|line| !is_heading(line))
                    .take(NAME_SCAN_LINES),
            )
        })
        .unwrap_or_default();

    let phone = PHONE_FR
        .find(text)
        .or_else(|| PHONE_INTL.find(text))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    PersonalInfo {
        first_name,
        last_name,
        email: EMAIL.find(text).map(|m| m.as_str().to_string()).unwrap_or_default(),
        phone,
        address: ADDRESS
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default(),
        summary: summary
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default(),
    }
}
