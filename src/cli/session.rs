//! Per-invocation state shared by commands

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::Event;
use crate::storage::{EventJournal, TaskList};

/// Resolved todo file plus the journal changes are recorded in
pub struct Session {
    todo_file: PathBuf,
    journal: Option<EventJournal>,
}

impl Session {
    pub fn new(todo_file: PathBuf, journal_enabled: bool) -> Self {
        let journal = journal_enabled.then(|| EventJournal::for_todo_file(&todo_file));
        Self { todo_file, journal }
    }

    pub fn todo_file(&self) -> &Path {
        &self.todo_file
    }

    /// Opens the task list, creating the file if needed
    pub fn open(&self) -> Result<TaskList> {
        tracing::debug!(path = %self.todo_file.display(), "opening task list");
        TaskList::open(&self.todo_file)
    }

    /// Journal for reading history, whether or not recording is enabled
    pub fn history(&self) -> EventJournal {
        EventJournal::for_todo_file(&self.todo_file)
    }

    /// Persists a mutation event; reads are not journaled
    pub fn record(&self, event: &Event) -> Result<()> {
        match &self.journal {
            Some(journal) if event.event_type().is_mutation() => journal.append([event]),
            _ => Ok(()),
        }
    }
}
