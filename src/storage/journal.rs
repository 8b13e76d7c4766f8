//! JSONL journal of task list events
//!
//! Each [`Event`] is appended as one JSON object per line, so the history
//! of a todo.txt file survives across invocations. The journal is never
//! rewritten.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Event;

/// Append-only store for events
pub struct EventJournal {
    path: PathBuf,
}

impl EventJournal {
    /// Creates a journal at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default journal for a todo file: `<stem>.log.jsonl` beside it
    pub fn for_todo_file(todo_file: &Path) -> Self {
        let stem = todo_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "todo".to_string());
        Self::new(todo_file.with_file_name(format!("{}.log.jsonl", stem)))
    }

    /// Returns the path to the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all events, oldest first
    pub fn read_all(&self) -> Result<Vec<Event>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open journal: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let event: Event = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse event at line {}", line_num + 1))?;

            events.push(event);
        }

        Ok(events)
    }

    /// Appends events to the journal
    pub fn append<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open journal: {}", self.path.display()))?;

        let mut writer = BufWriter::new(&file);
        let mut count = 0;
        for event in events {
            let line = serde_json::to_string(event).context("Failed to serialize event")?;
            writeln!(writer, "{}", line).context("Failed to write event")?;
            count += 1;
        }

        writer.flush().context("Failed to flush journal")?;

        tracing::debug!(path = %self.path.display(), count, "appended events to journal");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventType;
    use tempfile::TempDir;

    fn make_event(event_type: EventType, prior: &str, new: &str) -> Event {
        Event::new(event_type, "todo.txt", prior, new, vec!["task".to_string()])
    }

    #[test]
    fn read_missing_journal() {
        let dir = TempDir::new().unwrap();
        let journal = EventJournal::new(dir.path().join("todo.log.jsonl"));

        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_and_read_in_order() {
        let dir = TempDir::new().unwrap();
        let journal = EventJournal::new(dir.path().join("todo.log.jsonl"));

        let first = make_event(EventType::Added, "a", "b");
        let second = make_event(EventType::Deleted, "b", "c");

        journal.append([&first]).unwrap();
        journal.append([&second]).unwrap();

        let events = journal.read_all().unwrap();
        assert_eq!(events, vec![first, second]);
    }

    #[test]
    fn skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.log.jsonl");
        let journal = EventJournal::new(&path);

        journal.append([&make_event(EventType::Updated, "a", "b")]).unwrap();
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("\n\n");
        fs::write(&path, content).unwrap();

        assert_eq!(journal.read_all().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_line_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.log.jsonl");
        fs::write(&path, "not json\n").unwrap();

        let err = EventJournal::new(&path).read_all().unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
    }

    #[test]
    fn default_location_beside_todo_file() {
        let journal = EventJournal::for_todo_file(Path::new("/home/me/todo.txt"));
        assert_eq!(journal.path(), Path::new("/home/me/todo.log.jsonl"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let journal = EventJournal::new(dir.path().join("nested").join("todo.log.jsonl"));

        journal.append([&make_event(EventType::Read, "a", "a")]).unwrap();

        assert!(journal.path().exists());
    }
}
