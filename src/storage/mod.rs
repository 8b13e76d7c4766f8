//! # Storage Layer
//!
//! Persistence for ticklist: the todo.txt file itself, the in-memory task
//! list bound to it, and the event journal.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | todo.txt (one task per line) | `--file`, `$TICK_FILE`, config, or data dir `todo.txt` |
//! | Events | JSONL (one JSON per line) | `<stem>.log.jsonl` beside the todo file |
//! | Config | TOML | `~/.config/ticklist/config.toml` |
//!
//! ## Write Model
//!
//! - Every mutation reads the whole file, writes a full replacement
//!   (temp file + rename), then re-reads it
//! - There is no locking; a concurrent external writer wins or loses
//!   depending on timing
//! - The journal is append-only
//!
//! ## Key Types
//!
//! - [`TaskList`] - Parsed tasks bound to a file, with an event log
//! - [`TodoFile`] - Line-preserving reads and atomic writes
//! - [`EventJournal`] - Persisted event history
//! - [`Config`] - User configuration

mod config;
mod journal;
mod task_list;
mod todo_file;

pub use config::{Config, ConfigError, OutputFormat as ConfigFormat};
pub use journal::EventJournal;
pub use task_list::{TaskList, TaskListError};
pub use todo_file::{join_lines, split_lines, RawLine, TodoFile};
