//! Change events
//!
//! Every read of or change to a task list produces one [`Event`]. Events
//! are immutable once built and carry the content hash of the file before
//! and after the operation, so a sequence of them forms an audit trail.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of operation an event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Read,
    Added,
    Deleted,
    Updated,
}

impl EventType {
    /// Returns a display label for the event type
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Read => "read",
            EventType::Added => "added",
            EventType::Deleted => "deleted",
            EventType::Updated => "updated",
        }
    }

    /// Returns true if this event type changes file content
    pub fn is_mutation(&self) -> bool {
        !matches!(self, EventType::Read)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Record of one operation against a task list file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    event_type: EventType,
    file: PathBuf,
    prior_hash: String,
    new_hash: String,
    tasks: Vec<String>,
    occurred_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event stamped with the current time
    pub fn new(
        event_type: EventType,
        file: impl Into<PathBuf>,
        prior_hash: impl Into<String>,
        new_hash: impl Into<String>,
        tasks: Vec<String>,
    ) -> Self {
        Self {
            event_type,
            file: file.into(),
            prior_hash: prior_hash.into(),
            new_hash: new_hash.into(),
            tasks,
            occurred_at: Utc::now(),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Path of the task list file the event applies to
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Content hash before the operation
    pub fn prior_hash(&self) -> &str {
        &self.prior_hash
    }

    /// Content hash after the operation
    pub fn new_hash(&self) -> &str {
        &self.new_hash
    }

    /// Line texts the operation touched
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns true if the file content differs before and after
    pub fn changed_content(&self) -> bool {
        self.prior_hash != self.new_hash
    }
}
