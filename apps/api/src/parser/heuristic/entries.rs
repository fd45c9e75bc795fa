//! Entry parsing for the list-shaped sections (experience, education,
//! projects). A section body is split on blank lines; each chunk is one
//! candidate entry. The title is on the first header line that holds more
//! than dates, so "2020 - Present" above "Developer at Acme" still parses.

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::patterns::{
    char_len, clean_description, clean_fragment, strip_dates, BLANK_LINE, CURRENT, DATE,
    DEGREE_FIELD_SPLIT, EMPLOYER, LINK, SCHOOL, SCHOOL_HINT, SEPARATOR, TECHNOLOGIES,
};
use crate::models::resume::{Education, Project, WorkExperience};

const MIN_TITLE_CHARS: usize = 3;
/// Leading non-bullet lines inspected for dates and affiliation.
const HEADER_LINES: usize = 3;
/// Longest line still treated as an organisation name rather than prose.
const SHORT_LINE_CHARS: usize = 60;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("no title of at least {MIN_TITLE_CHARS} characters")]
    MissingTitle,
}

pub fn parse_experience(body: &str) -> Vec<WorkExperience> {
    parse_entries("workExperience", body, experience_entry)
}

pub fn parse_education(body: &str) -> Vec<Education> {
    parse_entries("education", body, education_entry)
}

pub fn parse_projects(body: &str) -> Vec<Project> {
    parse_entries("projects", body, project_entry)
}

fn parse_entries<T>(
    section: &'static str,
    body: &str,
    parse: impl Fn(&Entry<'_>) -> Result<T, EntryError>,
) -> Vec<T> {
    let chunks = split_entries(body);
    debug!(section, candidates = chunks.len(), "Parsing section entries");

    chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| match parse(&Entry::new(chunk)) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(section, index, error = %e, "Skipping entry");
                None
            }
        })
        .collect()
}

/// Blank-line chunks. A chunk that opens with a bullet continues the
/// previous entry instead of starting a new one.
fn split_entries(body: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for chunk in BLANK_LINE.split(body).map(str::trim).filter(|c| !c.is_empty()) {
        match entries.last_mut() {
            Some(previous) if is_bullet(chunk) => {
                previous.push('\n');
                previous.push_str(chunk);
            }
            _ => entries.push(chunk.to_string()),
        }
    }
    entries
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(['-', '–', '•', '·', '*', '▪'])
}

struct Entry<'a> {
    lines: Vec<&'a str>,
    header_len: usize,
    /// Index of the line carrying the title; earlier lines hold only dates.
    title_line: usize,
}

#[derive(Debug, Default, PartialEq)]
struct DateRange {
    start: String,
    end: String,
    current: bool,
}

impl<'a> Entry<'a> {
    fn new(chunk: &'a str) -> Self {
        let lines: Vec<&str> = chunk.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let header_len = lines
            .iter()
            .take(HEADER_LINES)
            .enumerate()
            .take_while(|(i, line)| *i == 0 || !is_bullet(line))
            .count();
        let title_line = (0..header_len)
            .find(|&i| title_segments(lines[i]).is_some())
            .unwrap_or(0);
        Self {
            lines,
            header_len,
            title_line,
        }
    }

    fn header(&self) -> String {
        self.lines[..self.header_len].join("\n")
    }

    /// First year token is the start, second the end.
    fn dates(&self) -> DateRange {
        let header = self.header();
        let mut found = DATE.find_iter(&header).map(|m| m.as_str().to_string());
        DateRange {
            start: found.next().unwrap_or_default(),
            end: found.next().unwrap_or_default(),
            current: CURRENT.is_match(&header),
        }
    }

    /// Title and the remaining non-date segments of the title line.
    fn title(&self) -> Result<(String, Vec<String>), EntryError> {
        self.lines
            .get(self.title_line)
            .and_then(|line| title_segments(line))
            .ok_or(EntryError::MissingTitle)
    }

    /// Lines after the title line.
    fn rest(&self) -> &[&'a str] {
        self.lines.get(self.title_line + 1..).unwrap_or(&[])
    }

    /// First header line after the title that names an organisation, with
    /// its index. `accept` decides whether a plain line qualifies.
    fn affiliation_line(
        &self,
        connector: &Regex,
        accept: impl Fn(&str) -> bool,
    ) -> Option<(usize, String)> {
        (self.title_line + 1..self.header_len).find_map(|i| {
            let line = self.lines[i];
            if let Some(name) = affiliation(line, connector).map(|(_, name)| name) {
                return Some((i, name));
            }
            let cleaned = clean_fragment(&strip_dates(line));
            let plain = !cleaned.is_empty()
                && char_len(line) <= SHORT_LINE_CHARS
                && !line.ends_with('.')
                && accept(cleaned.as_str());
            plain.then_some((i, cleaned))
        })
    }

    /// Everything after the title line except `consumed`; dates are removed
    /// from the header lines they were read from.
    fn description(&self, consumed: Option<usize>, skip: impl Fn(&str) -> bool) -> String {
        let lines: Vec<String> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.title_line + 1)
            .filter(|(i, line)| Some(*i) != consumed && !skip(**line))
            .map(|(i, line)| {
                if i < self.header_len {
                    strip_dates(line)
                } else {
                    line.to_string()
                }
            })
            .collect();
        clean_description(&lines.join("\n"))
    }
}

/// Separator-split segments of `line` with dates removed: the first one long
/// enough to be a title, then the rest. `None` for date-only lines.
fn title_segments(line: &str) -> Option<(String, Vec<String>)> {
    let mut segments = SEPARATOR
        .split(line)
        .map(|segment| clean_fragment(&strip_dates(segment)))
        .filter(|segment| !segment.is_empty());

    let title = segments
        .by_ref()
        .find(|segment| char_len(segment) >= MIN_TITLE_CHARS)?;
    Some((title, segments.collect()))
}

/// Splits "Title at Org" into its two halves. Returns `None` when the
/// connector is missing or names nothing.
fn affiliation(text: &str, connector: &Regex) -> Option<(String, String)> {
    let caps = connector.captures(text)?;
    let whole = caps.get(0)?;
    let name = clean_fragment(&strip_dates(caps.get(1)?.as_str()));
    if name.is_empty() {
        return None;
    }
    Some((clean_fragment(&text[..whole.start()]), name))
}

fn experience_entry(entry: &Entry<'_>) -> Result<WorkExperience, EntryError> {
    let (mut position, others) = entry.title()?;
    let mut company = String::new();
    let mut consumed = None;

    if let Some((before, name)) = affiliation(&position, &EMPLOYER) {
        if !before.is_empty() {
            position = before;
            company = name;
        }
    }
    if company.is_empty() {
        company = others
            .iter()
            .find_map(|segment| affiliation(segment, &EMPLOYER).map(|(_, name)| name))
            .or_else(|| others.first().cloned())
            .unwrap_or_default();
    }
    if company.is_empty() {
        if let Some((index, name)) = entry.affiliation_line(&EMPLOYER, |_| true) {
            company = name;
            consumed = Some(index);
        }
    }

    let dates = entry.dates();
    Ok(WorkExperience {
        position,
        company,
        start_date: dates.start,
        end_date: dates.end,
        current: dates.current,
        description: entry.description(consumed, |_| false),
    })
}

fn education_entry(entry: &Entry<'_>) -> Result<Education, EntryError> {
    let (mut degree, others) = entry.title()?;
    let mut school = String::new();
    let mut consumed = None;

    if let Some((before, name)) = affiliation(&degree, &SCHOOL) {
        if !before.is_empty() {
            degree = before;
            school = name;
        }
    }
    if school.is_empty() {
        if SCHOOL_HINT.is_match(&degree) && !others.is_empty() {
            // "Université X | Master en Y": the school came first.
            school = std::mem::replace(&mut degree, others[0].clone());
        } else {
            school = others.first().cloned().unwrap_or_default();
        }
    }
    if school.is_empty() {
        if let Some((index, name)) =
            entry.affiliation_line(&SCHOOL, |line| SCHOOL_HINT.is_match(line))
        {
            school = name;
            consumed = Some(index);
        }
    }

    let (degree, field) = match DEGREE_FIELD_SPLIT.splitn(&degree, 2).collect::<Vec<_>>()[..] {
        [degree, field] => (clean_fragment(degree), clean_fragment(field)),
        _ => (degree.clone(), String::new()),
    };

    let dates = entry.dates();
    Ok(Education {
        school,
        degree,
        field,
        start_date: dates.start,
        end_date: dates.end,
        current: dates.current,
        description: entry.description(consumed, |_| false),
    })
}

fn project_entry(entry: &Entry<'_>) -> Result<Project, EntryError> {
    let (name, others) = entry.title()?;
    let rest = entry.rest().join("\n");

    let technologies: Vec<String> = TECHNOLOGIES
        .captures_iter(&rest)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| m.as_str().split([',', ';', '/']))
        .map(|t| t.trim().trim_end_matches('.').trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let link = LINK
        .find(&entry.lines.join("\n"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let is_link_only =
        |line: &str| LINK.find(line).is_some_and(|m| m.as_str() == line.trim());
    let body = entry.description(None, |line| TECHNOLOGIES.is_match(line) || is_link_only(line));
    let description = others
        .into_iter()
        .chain((!body.is_empty()).then_some(body))
        .collect::<Vec<_>>()
        .join("\n");

    let dates = entry.dates();
    Ok(Project {
        name,
        description,
        technologies,
        start_date: dates.start,
        end_date: dates.end,
        link,
    })
}
