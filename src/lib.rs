//! ticklist - todo.txt task lists with an auditable change log
//!
//! Parses and renders todo.txt lines, keeps a task list in sync with its
//! file, and records every read and change as an [`Event`] carrying the
//! SHA-256 of the file content before and after.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{content_hash, parse, Event, EventType, TagValue, Task, TaskFields};
pub use storage::{TaskList, TaskListError};
