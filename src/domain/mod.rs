//! Domain models for ticklist
//!
//! Contains the todo.txt grammar and change records without any I/O concerns.

mod event;
mod hash;
mod parser;
mod task;

pub use event::{Event, EventType};
pub use hash::content_hash;
pub use parser::{parse, TaskFields};
pub use task::{today, TagValue, Task, DATE_FORMAT};
