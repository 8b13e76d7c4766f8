//! Journal and hash commands

use anyhow::Result;

use super::output::Output;
use super::session::Session;

/// Width of hash prefixes in text output
const SHORT_HASH: usize = 12;

pub fn log(session: &Session, output: &Output, limit: Option<usize>) -> Result<()> {
    let journal = session.history();
    let mut events = journal.read_all()?;

    if let Some(limit) = limit {
        let skip = events.len().saturating_sub(limit);
        events.drain(..skip);
    }

    if output.is_json() {
        output.data(&events);
        return Ok(());
    }

    if events.is_empty() {
        output.success("No recorded events");
        return Ok(());
    }

    for event in &events {
        let occurred_at = event.occurred_at().format("%Y-%m-%d %H:%M:%S").to_string();
        let hashes = if event.changed_content() {
            format!("{}..{}", short(event.prior_hash()), short(event.new_hash()))
        } else {
            format!("{} unchanged", short(event.new_hash()))
        };
        output.row(&[
            occurred_at.as_str(),
            event.event_type().label(),
            hashes.as_str(),
            event.tasks().join(" | ").as_str(),
        ]);
    }

    Ok(())
}

pub fn hash(session: &Session, output: &Output) -> Result<()> {
    let list = session.open()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": list.path(),
            "hash": list.tasks_hash(),
            "tasks": list.len(),
        }));
    } else {
        output.success(list.tasks_hash());
    }

    Ok(())
}

fn short(hash: &str) -> &str {
    hash.get(..SHORT_HASH).unwrap_or(hash)
}
