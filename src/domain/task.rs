//! Task domain model
//!
//! A task is one line of a todo.txt file. [`Task`] holds the structured
//! form; its `Display` impl renders the canonical line that
//! [`parse`](super::parse) reads back field for field.

use std::fmt;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parser::{parse, TaskFields};

/// Date format used for every date in a todo.txt line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value of a `key:value` tag
///
/// Values shaped like `YYYY-MM-DD` that name a real calendar date are kept
/// as dates; everything else is text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Date(NaiveDate),
    Text(String),
}

impl TagValue {
    /// Interprets a raw tag value
    pub fn parse(raw: &str) -> Self {
        let date_shaped = raw.len() == 10
            && raw.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });

        if date_shaped {
            if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                return TagValue::Date(date);
            }
        }

        TagValue::Text(raw.to_string())
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            TagValue::Text(text) => f.write_str(text),
        }
    }
}

/// A single todo.txt task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Free text left after all markers are removed
    pub description: String,

    /// True if the line carries the `x ` completion marker
    #[serde(default)]
    pub done: bool,

    /// Priority character from `(A)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<char>,

    /// Completion date; only meaningful when `done` is set, but not enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,

    /// Creation date
    pub created_at: NaiveDate,

    /// `+project` markers in order of appearance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    /// `@context` markers in order of appearance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,

    /// `key:value` tags in order of first appearance
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: IndexMap<String, TagValue>,
}

impl Task {
    /// Creates an open task created today
    pub fn new(description: impl Into<String>) -> Self {
        Self::from_fields(TaskFields {
            description: description.into(),
            ..TaskFields::default()
        })
    }

    /// Builds a task from parsed fields, defaulting the creation date to today
    pub fn from_fields(fields: TaskFields) -> Self {
        Self {
            description: fields.description,
            done: fields.done,
            priority: fields.priority,
            completed_at: fields.completed_at,
            created_at: fields.created_at.unwrap_or_else(today),
            projects: fields.projects,
            contexts: fields.contexts,
            tags: fields.tags,
        }
    }

    /// Parses a todo.txt line into a task
    pub fn parse(line: &str) -> Self {
        Self::from_fields(parse(line))
    }

    /// Returns this task marked done on the given date
    pub fn completed(mut self, on: NaiveDate) -> Self {
        self.done = true;
        self.completed_at = Some(on);
        self
    }

    /// Returns true if the task carries the given `+project`
    pub fn has_project(&self, project: &str) -> bool {
        self.projects.iter().any(|p| p == project)
    }

    /// Returns true if the task carries the given `@context`
    pub fn has_context(&self, context: &str) -> bool {
        self.contexts.iter().any(|c| c == context)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.done {
            parts.push("x".to_string());
        }
        if let Some(priority) = self.priority {
            parts.push(format!("({})", priority));
        }
        if let Some(completed_at) = self.completed_at {
            parts.push(completed_at.format(DATE_FORMAT).to_string());
        }

        parts.push(self.created_at.format(DATE_FORMAT).to_string());
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }

        parts.extend(
            self.projects
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| format!("+{}", p)),
        );
        parts.extend(
            self.contexts
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| format!("@{}", c)),
        );
        parts.extend(self.tags.iter().map(|(k, v)| format!("{}:{}", k, v)));

        f.write_str(&parts.join(" "))
    }
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_task_is_open_and_created_today() {
        let task = Task::new("Call mom");
        assert!(!task.done);
        assert_eq!(task.created_at, today());
        assert!(task.projects.is_empty());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn minimal_rendering() {
        let mut task = Task::new("Call mom");
        task.created_at = date(2019, 1, 2);
        assert_eq!(task.to_string(), "2019-01-02 Call mom");
    }

    #[test]
    fn full_rendering_order() {
        let mut tags = IndexMap::new();
        tags.insert("due".to_string(), TagValue::Date(date(2019, 2, 1)));
        tags.insert("rec".to_string(), TagValue::Text("1w".to_string()));

        let task = Task {
            description: "Pay rent".to_string(),
            done: true,
            priority: Some('A'),
            completed_at: Some(date(2019, 1, 5)),
            created_at: date(2019, 1, 1),
            projects: vec!["Home".to_string(), "Money".to_string()],
            contexts: vec!["online".to_string()],
            tags,
        };

        assert_eq!(
            task.to_string(),
            "x (A) 2019-01-05 2019-01-01 Pay rent +Home +Money @online due:2019-02-01 rec:1w"
        );
    }

    #[test]
    fn empty_markers_are_skipped() {
        let mut task = Task::new("Tidy");
        task.created_at = date(2019, 1, 2);
        task.projects = vec![String::new(), "Home".to_string()];
        task.contexts = vec![String::new()];
        assert_eq!(task.to_string(), "2019-01-02 Tidy +Home");
    }

    #[test]
    fn empty_description_has_no_trailing_space() {
        let task = Task::parse("2019-01-02");
        assert_eq!(task.description, "");
        assert_eq!(task.to_string(), "2019-01-02");
    }

    #[test]
    fn parse_defaults_created_at_to_today() {
        let task = Task::parse("Call mom");
        assert_eq!(task.created_at, today());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn parse_with_date_tags() {
        let task = Task::parse("2019-01-01 Test Task +Project1 due:2019-02-01");
        assert_eq!(task.created_at, date(2019, 1, 1));
        assert!(task.completed_at.is_none());
        assert_eq!(task.tags.get("due"), Some(&TagValue::Date(date(2019, 2, 1))));
        assert_eq!(task.projects, vec!["Project1"]);
    }

    #[test]
    fn completed_sets_marker_and_date() {
        let task = Task::parse("(B) 2019-01-01 Water plants @home").completed(date(2019, 1, 3));
        assert_eq!(task.to_string(), "x (B) 2019-01-03 2019-01-01 Water plants @home");
    }

    #[test]
    fn project_and_context_lookup() {
        let task = Task::parse("2019-01-01 Plan trip +Travel @laptop");
        assert!(task.has_project("Travel"));
        assert!(!task.has_project("travel"));
        assert!(task.has_context("laptop"));
        assert!(!task.has_context("phone"));
    }

    #[test]
    fn tag_value_parsing() {
        assert_eq!(TagValue::parse("2019-02-01"), TagValue::Date(date(2019, 2, 1)));
        assert_eq!(TagValue::parse("2019-02-30"), TagValue::Text("2019-02-30".to_string()));
        assert_eq!(TagValue::parse("2019-2-1"), TagValue::Text("2019-2-1".to_string()));
        assert_eq!(TagValue::parse("soon"), TagValue::Text("soon".to_string()));
    }

    #[test]
    fn serde_roundtrip() {
        let task = Task::parse("x (A) 2019-01-05 2019-01-01 Pay rent +Home @online due:2019-02-01 n:3");
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, parsed);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_date() -> impl Strategy<Value = NaiveDate> {
            (1000i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
        }

        fn arb_tag_value() -> impl Strategy<Value = TagValue> {
            prop_oneof![
                arb_date().prop_map(TagValue::Date),
                "[a-z][a-z0-9]{0,7}".prop_map(TagValue::Text),
            ]
        }

        prop_compose! {
            fn arb_task()(
                description in proptest::collection::vec("[a-z]{1,8}", 0..5),
                done in any::<bool>(),
                priority in proptest::option::of(proptest::char::range('A', 'Z')),
                completed_at in proptest::option::of(arb_date()),
                created_at in arb_date(),
                projects in proptest::collection::vec("[A-Za-z0-9]{1,8}", 0..4),
                contexts in proptest::collection::vec("[A-Za-z0-9]{1,8}", 0..4),
                tags in proptest::collection::vec(("[a-z]{1,6}", arb_tag_value()), 0..4),
            ) -> Task {
                Task {
                    description: description.join(" "),
                    done,
                    priority,
                    completed_at,
                    created_at,
                    projects,
                    contexts,
                    tags: tags.into_iter().collect(),
                }
            }
        }

        proptest! {
            #[test]
            fn rendered_task_parses_back(task in arb_task()) {
                let reparsed = Task::parse(&task.to_string());
                prop_assert_eq!(reparsed, task);
            }
        }
    }
}
