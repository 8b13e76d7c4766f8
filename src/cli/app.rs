//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::task::ListFilter;
use super::{history, logging, task};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "tick")]
#[command(author, version, about = "todo.txt task list with a change journal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the todo.txt file
    #[arg(long, short = 'F', global = true, env = "TICK_FILE")]
    pub file: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Do not record changes in the event journal
    #[arg(long, global = true)]
    pub no_journal: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their line numbers
    List {
        /// Only tasks with this +project
        #[arg(long, short)]
        project: Option<String>,

        /// Only tasks with this @context
        #[arg(long, short)]
        context: Option<String>,

        /// Include completed tasks
        #[arg(long, short)]
        all: bool,
    },

    /// Show one task's fields
    Show {
        /// Line number (zero-based)
        index: usize,
    },

    /// Add tasks
    ///
    /// Examples:
    ///   tick add "(A) Call mom +Family @phone"
    ///   tick add --raw "x 2019-01-01 imported line"
    Add {
        /// Task lines in todo.txt format
        #[arg(required = true)]
        tasks: Vec<String>,

        /// Store lines verbatim instead of normalizing them
        #[arg(long)]
        raw: bool,
    },

    /// Delete tasks by line number
    Rm {
        /// Line numbers (zero-based)
        #[arg(required = true)]
        indices: Vec<usize>,
    },

    /// Replace a task's text
    Edit {
        /// Line number (zero-based)
        index: usize,

        /// New task line in todo.txt format
        text: String,
    },

    /// Mark tasks as done today
    Done {
        /// Line numbers (zero-based)
        #[arg(required = true)]
        indices: Vec<usize>,
    },

    /// Show the recorded change history
    Log {
        /// Only the most recent N events
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Print the content hash of the todo file
    Hash,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format);

    let todo_file = config.resolve_todo_file(cli.file.as_deref());
    let session = Session::new(todo_file, config.journal && !cli.no_journal);
    tracing::debug!(path = %session.todo_file().display(), "resolved todo file");

    match cli.command {
        Commands::List {
            project,
            context,
            all,
        } => {
            let filter = ListFilter {
                project,
                context,
                include_done: all,
            };
            task::list(&session, &output, &filter)?
        }
        Commands::Show { index } => task::show(&session, &output, index)?,
        Commands::Add { tasks, raw } => task::add(&session, &output, tasks, raw)?,
        Commands::Rm { indices } => task::remove(&session, &output, indices)?,
        Commands::Edit { index, text } => task::edit(&session, &output, index, text)?,
        Commands::Done { indices } => task::complete(&session, &output, indices)?,
        Commands::Log { limit } => history::log(&session, &output, limit)?,
        Commands::Hash => history::hash(&session, &output)?,
    }

    Ok(())
}
