//! Isolating structured data in free-text model output.
//!
//! JSON extraction takes the span from the first `{` to the last `}` and
//! parses it as one value. It does not balance braces: output holding two
//! separate objects yields a span covering both (and usually fails to
//! parse), and a stray `}` after the object widens the span past it.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::ExtractionError;
use crate::domain::artifact::CourseRef;

/// Parse the first-`{`-to-last-`}` span of `raw` as JSON.
pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return Err(ExtractionError::NoJsonFound);
    };
    if end < start {
        return Err(ExtractionError::MalformedJson {
            details: "closing brace precedes opening brace".to_string(),
        });
    }

    serde_json::from_str(&raw[start..=end])
        .map_err(|err| ExtractionError::MalformedJson { details: err.to_string() })
}

fn question_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"Question\s+\d+:\s+").expect("valid question marker regex"))
}

fn question_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"Question\s+\d+:").expect("valid question boundary regex"))
}

fn line_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^Question\s+\d+:\s+").expect("valid line prefix regex"))
}

/// Collect the text of every `Question <n>: <text>` segment.
///
/// A segment runs from its marker to the next `Question <n>:` or the end of
/// input, so multi-line question text is kept together.
pub fn scan_question_segments(raw: &str) -> Vec<String> {
    let mut questions = Vec::new();
    let mut pos = 0;

    while let Some(marker) = question_marker().find_at(raw, pos) {
        let start = marker.end();
        let end = question_boundary().find_at(raw, start).map_or(raw.len(), |b| b.start());
        questions.push(raw[start..end].trim().to_string());
        pos = end;
    }

    questions
}

/// Collect lines that start with `Question`, stripping the numbered prefix.
///
/// The prefix is only stripped when the untrimmed line begins with it, so an
/// indented line keeps its `Question <n>:` text.
pub fn scan_question_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|line| line.trim().starts_with("Question"))
        .map(|line| line_prefix().replace(line, "").trim().to_string())
        .collect()
}

const COURSES_HEADER: &str = "## Recommended Courses\n";
const COURSE_ENTRY: &str = "- **Course Title**: ";

/// Parse the `## Recommended Courses` section of learning content.
///
/// Entries missing any of title, platform, duration, price, link, or
/// description are dropped.
pub fn parse_course_section(raw: &str) -> Vec<CourseRef> {
    let Some(index) = raw.find(COURSES_HEADER) else {
        return Vec::new();
    };
    let section = &raw[index + COURSES_HEADER.len()..];

    section.split(COURSE_ENTRY).skip(1).filter_map(parse_course_entry).collect()
}

fn parse_course_entry(entry: &str) -> Option<CourseRef> {
    let lines: Vec<&str> = entry.split('\n').filter(|line| !line.trim().is_empty()).collect();
    let title = lines.first()?.trim();

    let labelled = |label: &str| {
        lines
            .iter()
            .find(|line| line.contains(label))
            .and_then(|line| line.split(": ").nth(1))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let platform = labelled("Platform")?;
    let duration = labelled("Duration")?;
    let price = labelled("Price")?;
    let link = labelled("Link")?;
    let description = labelled("Description")?;
    if title.is_empty() {
        return None;
    }

    Some(CourseRef {
        platform,
        title: title.to_string(),
        link,
        price,
        duration,
        mentor: None,
        image: None,
        description: Some(description),
    })
}
