//! todo.txt line parser
//!
//! A line is taken apart in a fixed order, each stage removing what it
//! matched before handing the remainder on:
//!
//! 1. completion marker (`x `)
//! 2. priority (`(A)`, first occurrence only)
//! 3. tags (`key:value`)
//! 4. projects (`+project`)
//! 5. contexts (`@context`)
//! 6. dates (`[completed] created`)
//! 7. description (whatever is left)
//!
//! Tags are taken before projects and contexts so that values such as
//! `cost:+5` never leak into the project list. Dates are taken last so
//! that date-valued tags (`due:2019-02-01`) are already gone.
//!
//! Tag, project and context markers count only at the start of the
//! remaining text or after whitespace, so `bob@example.com` stays text.
//!
//! Parsing never fails: anything that does not match a marker stays in the
//! description.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;

use super::task::{TagValue, DATE_FORMAT};

static PRIORITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\((\S)\)").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s+)(\S+:\S+)").unwrap());

static PROJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s+)\+(\S+)").unwrap());

static CONTEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s+)@(\S+)").unwrap());

static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

/// Attributes extracted from a single todo.txt line
///
/// `created_at` stays optional here; [`super::Task::from_fields`] fills in
/// the current date when the line carried none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub description: String,
    pub done: bool,
    pub priority: Option<char>,
    pub completed_at: Option<NaiveDate>,
    pub created_at: Option<NaiveDate>,
    pub projects: Vec<String>,
    pub contexts: Vec<String>,
    pub tags: IndexMap<String, TagValue>,
}

/// Parses one line of todo.txt text
pub fn parse(line: &str) -> TaskFields {
    let text = line.trim();

    let (done, text) = done(text);
    let (priority, text) = priority(text);
    let (tags, text) = tags(&text);
    let (projects, text) = marked(&PROJECT, &text);
    let (contexts, text) = marked(&CONTEXT, &text);
    let (completed_at, created_at, text) = dates(&text);

    TaskFields {
        description: text.trim().to_string(),
        done,
        priority,
        completed_at,
        created_at,
        projects,
        contexts,
        tags,
    }
}

fn done(text: &str) -> (bool, &str) {
    match text.strip_prefix('x') {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, text),
    }
}

fn priority(text: &str) -> (Option<char>, String) {
    let mark = PRIORITY
        .captures(text)
        .and_then(|caps| caps[1].chars().next());

    match mark {
        Some(_) => (mark, PRIORITY.replace(text, "").trim().to_string()),
        None => (None, text.to_string()),
    }
}

fn tags(text: &str) -> (IndexMap<String, TagValue>, String) {
    let mut tags = IndexMap::new();

    for caps in TAG.captures_iter(text) {
        if let Some((key, value)) = caps[1].split_once(':') {
            // Re-inserting keeps the key's first position but takes the new value
            tags.insert(key.to_string(), TagValue::parse(value));
        }
    }

    if tags.is_empty() {
        return (tags, text.to_string());
    }

    (tags, TAG.replace_all(text, "").trim().to_string())
}

/// Collects `+project` / `@context` style markers in order of appearance
fn marked(pattern: &Regex, text: &str) -> (Vec<String>, String) {
    let found: Vec<String> = pattern
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();

    if found.is_empty() {
        return (found, text.to_string());
    }

    (found, pattern.replace_all(text, "").trim().to_string())
}

/// Extracts up to two standalone dates
///
/// Two dates read as `completed created`; a single date is the creation
/// date. Further date-like tokens stay in the text.
fn dates(text: &str) -> (Option<NaiveDate>, Option<NaiveDate>, String) {
    let mut found: Vec<(Range<usize>, NaiveDate)> = Vec::with_capacity(2);

    for m in DATE.find_iter(text) {
        if found.len() == 2 {
            break;
        }
        if !is_standalone(text, m.range()) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT) {
            found.push((m.range(), date));
        }
    }

    let (completed_at, created_at) = match found.as_slice() {
        [(_, completed), (_, created)] => (Some(*completed), Some(*created)),
        [(_, created)] => (None, Some(*created)),
        _ => return (None, None, text.to_string()),
    };

    let mut rest = String::with_capacity(text.len());
    let mut cursor = 0;
    for (span, _) in &found {
        rest.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    rest.push_str(&text[cursor..]);

    (completed_at, created_at, rest.trim().to_string())
}

fn is_standalone(text: &str, span: Range<usize>) -> bool {
    let before = text[..span.start].chars().next_back();
    let after = text[span.end..].chars().next();
    before.map_or(true, char::is_whitespace) && after.map_or(true, char::is_whitespace)
}
