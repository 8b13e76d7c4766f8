//! Task list bound to a todo.txt file
//!
//! [`TaskList`] keeps the parsed tasks of one file in memory and records an
//! [`Event`] for every operation. Mutations are read-modify-write against
//! the file: the content hash is taken from what is on disk before the
//! change, the full replacement is written, and the tasks are re-read from
//! disk afterwards. The in-memory list is never patched directly, so it
//! always reflects exactly what the file holds.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use super::todo_file::{join_lines, split_lines, RawLine, TodoFile};
use crate::domain::{content_hash, Event, EventType, Task};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskListError {
    #[error("Index {index} out of range: task list has {len} lines")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Task text for line {index} contains a line break")]
    MultiLine { index: usize },
}

/// In-memory view of a todo.txt file plus its event log
#[derive(Debug)]
pub struct TaskList {
    file: TodoFile,
    lines: Vec<String>,
    tasks: Vec<Task>,
    tasks_hash: String,
    log: Vec<Event>,
}

impl TaskList {
    /// Opens the task list at `path`, creating an empty file if needed
    ///
    /// The initial load is recorded as the first `read` event.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut list = Self {
            file: TodoFile::new(path.as_ref()),
            lines: Vec::new(),
            tasks: Vec::new(),
            tasks_hash: content_hash(""),
            log: Vec::new(),
        };
        list.load()?;
        Ok(list)
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Tasks in file line order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task at a line index
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Returns the unparsed text of a line
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Hash of the file content as of the last operation
    pub fn tasks_hash(&self) -> &str {
        &self.tasks_hash
    }

    /// Events recorded by this instance, oldest first
    pub fn log(&self) -> &[Event] {
        &self.log
    }

    /// Re-reads the file
    pub fn load(&mut self) -> Result<Event> {
        if self.file.ensure_exists()? {
            tracing::info!(path = %self.file.path().display(), "created task file");
        }

        let prior_hash = self.tasks_hash.clone();
        self.sync()?;
        let lines = self.lines.clone();

        Ok(self.record(EventType::Read, prior_hash, lines))
    }

    /// Appends lines of todo.txt text to the end of the file
    pub fn add<I, S>(&mut self, lines: I) -> Result<Event>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let additions: Vec<String> = lines.into_iter().map(Into::into).collect();

        let content = self.file.read()?;
        let prior_hash = content_hash(&content);
        let mut current = split_lines(&content);

        for (offset, text) in additions.iter().enumerate() {
            check_single_line(current.len() + offset, text)?;
        }

        if !additions.is_empty() {
            // An unterminated last line must not merge with the first addition
            if let Some(last) = current.last_mut() {
                if last.ending.is_empty() {
                    last.ending = "\n";
                }
            }
            current.extend(additions.iter().map(RawLine::new));
            self.file.write(&join_lines(&current))?;
        }

        self.sync()?;
        Ok(self.record(EventType::Added, prior_hash, additions))
    }

    /// Removes the lines at the given zero-based indices
    ///
    /// Fails with [`TaskListError::IndexOutOfRange`] before touching the
    /// file if any index is past the end.
    pub fn delete<I>(&mut self, indices: I) -> Result<Event>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: BTreeSet<usize> = indices.into_iter().collect();

        let content = self.file.read()?;
        let prior_hash = content_hash(&content);
        let current = split_lines(&content);
        check_range(indices.iter().copied(), current.len())?;

        let (removed, kept): (Vec<_>, Vec<_>) = current
            .into_iter()
            .enumerate()
            .partition(|(index, _)| indices.contains(index));

        let removed: Vec<String> = removed.into_iter().map(|(_, line)| line.text).collect();
        let kept: Vec<RawLine> = kept.into_iter().map(|(_, line)| line).collect();

        self.file.write(&join_lines(&kept))?;
        self.sync()?;
        Ok(self.record(EventType::Deleted, prior_hash, removed))
    }

    /// Replaces the text of the given lines
    ///
    /// The event lists replacement texts in line order. If an index appears
    /// more than once, the last replacement wins.
    pub fn update<I, S>(&mut self, changes: I) -> Result<Event>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let changes: BTreeMap<usize, String> = changes
            .into_iter()
            .map(|(index, text)| (index, text.into()))
            .collect();

        let content = self.file.read()?;
        let prior_hash = content_hash(&content);
        let mut current = split_lines(&content);
        check_range(changes.keys().copied(), current.len())?;
        for (index, text) in &changes {
            check_single_line(*index, text)?;
        }

        for (index, text) in &changes {
            current[*index].text = text.clone();
        }

        self.file.write(&join_lines(&current))?;
        self.sync()?;
        Ok(self.record(EventType::Updated, prior_hash, changes.into_values().collect()))
    }

    /// Reloads lines, tasks and hash from disk
    fn sync(&mut self) -> Result<()> {
        let content = self.file.read()?;
        self.lines = split_lines(&content).into_iter().map(|line| line.text).collect();
        self.tasks = self.lines.iter().map(|line| Task::parse(line)).collect();
        self.tasks_hash = content_hash(&content);
        Ok(())
    }

    fn record(&mut self, event_type: EventType, prior_hash: String, tasks: Vec<String>) -> Event {
        let event = Event::new(
            event_type,
            self.file.path(),
            prior_hash,
            self.tasks_hash.clone(),
            tasks,
        );

        tracing::debug!(
            event = %event.event_type(),
            path = %event.file().display(),
            prior_hash = %event.prior_hash(),
            new_hash = %event.new_hash(),
            count = event.tasks().len(),
            "recorded task list event"
        );

        self.log.push(event.clone());
        event
    }
}

fn check_range(indices: impl IntoIterator<Item = usize>, len: usize) -> Result<(), TaskListError> {
    match indices.into_iter().find(|index| *index >= len) {
        Some(index) => Err(TaskListError::IndexOutOfRange { index, len }),
        None => Ok(()),
    }
}

fn check_single_line(index: usize, text: &str) -> Result<(), TaskListError> {
    if text.contains(['\n', '\r']) {
        return Err(TaskListError::MultiLine { index });
    }
    Ok(())
}
