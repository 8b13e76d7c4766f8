//! # Command-Line Interface
//!
//! User-facing `tick` commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list`, `show` | Read tasks |
//! | `add`, `rm`, `edit`, `done` | Change tasks (journaled) |
//! | `log`, `hash` | Inspect history and content hash |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr; `RUST_LOG`
//! overrides the level:
//! ```bash
//! tick --verbose add "Call mom"
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod history;
mod logging;
mod output;
mod session;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
