//! Task CLI commands

use anyhow::Result;
use chrono::NaiveDate;

use super::output::Output;
use super::session::Session;
use crate::domain::{parse, today, Task};
use crate::storage::{TaskList, TaskListError};

/// Which tasks `list` shows
#[derive(Debug, Default)]
pub struct ListFilter {
    pub project: Option<String>,
    pub context: Option<String>,
    pub include_done: bool,
}

impl ListFilter {
    fn matches(&self, task: &Task) -> bool {
        if task.done && !self.include_done {
            return false;
        }
        if let Some(project) = &self.project {
            if !task.has_project(project) {
                return false;
            }
        }
        if let Some(context) = &self.context {
            if !task.has_context(context) {
                return false;
            }
        }
        true
    }
}

pub fn list(session: &Session, output: &Output, filter: &ListFilter) -> Result<()> {
    let list = session.open()?;

    let visible: Vec<(usize, &Task)> = list
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .collect();

    if output.is_json() {
        let items: Vec<_> = visible
            .iter()
            .map(|(index, task)| {
                serde_json::json!({
                    "index": index,
                    "line": task.to_string(),
                    "task": task,
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if visible.is_empty() {
        output.success("No tasks");
        return Ok(());
    }

    for (index, task) in visible {
        output.row(&[index.to_string().as_str(), task.to_string().as_str()]);
    }

    Ok(())
}

pub fn show(session: &Session, output: &Output, index: usize) -> Result<()> {
    let list = session.open()?;
    let task = task_at(&list, index)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "index": index,
            "line": task.to_string(),
            "task": task,
        }));
        return Ok(());
    }

    output.row(&["description", &task.description]);
    output.row(&["done", if task.done { "yes" } else { "no" }]);
    if let Some(priority) = task.priority {
        output.row(&["priority", &priority.to_string()]);
    }
    if let Some(completed_at) = task.completed_at {
        output.row(&["completed", &completed_at.to_string()]);
    }
    output.row(&["created", &task.created_at.to_string()]);
    if !task.projects.is_empty() {
        output.row(&["projects", &task.projects.join(", ")]);
    }
    if !task.contexts.is_empty() {
        output.row(&["contexts", &task.contexts.join(", ")]);
    }
    for (key, value) in &task.tags {
        output.row(&[key.as_str(), value.to_string().as_str()]);
    }

    Ok(())
}

/// Adds tasks; unless `raw`, each line is normalized and stamped with today's date
pub fn add(session: &Session, output: &Output, texts: Vec<String>, raw: bool) -> Result<()> {
    let lines: Vec<String> = if raw {
        texts
    } else {
        texts.iter().map(|text| Task::parse(text).to_string()).collect()
    };

    let mut list = session.open()?;
    let first_index = list.len();
    let event = list.add(lines)?;
    session.record(&event)?;

    if output.is_json() {
        output.data(&event);
        return Ok(());
    }

    for (offset, line) in event.tasks().iter().enumerate() {
        output.success(&format!("Added task {}: {}", first_index + offset, line));
    }

    Ok(())
}

pub fn remove(session: &Session, output: &Output, indices: Vec<usize>) -> Result<()> {
    let mut list = session.open()?;
    let event = list.delete(indices)?;
    session.record(&event)?;

    if output.is_json() {
        output.data(&event);
        return Ok(());
    }

    for line in event.tasks() {
        output.success(&format!("Deleted: {}", line));
    }

    Ok(())
}

pub fn edit(session: &Session, output: &Output, index: usize, text: String) -> Result<()> {
    let mut list = session.open()?;
    let event = list.update([(index, text)])?;
    session.record(&event)?;

    if output.is_json() {
        output.data(&event);
        return Ok(());
    }

    output.success(&format!("Updated task {}: {}", index, event.tasks().join("")));
    Ok(())
}

/// Marks tasks done as of today; tasks already done are left alone
pub fn complete(session: &Session, output: &Output, indices: Vec<usize>) -> Result<()> {
    let mut list = session.open()?;

    let mut changes = Vec::new();
    for index in indices {
        let task = task_at(&list, index)?;
        if task.done {
            tracing::debug!(index, "task already done");
            continue;
        }
        let line = list.line(index).unwrap_or_default();
        changes.push((index, completed_line(line, today())));
    }

    if changes.is_empty() {
        output.success("Nothing to complete");
        return Ok(());
    }

    let event = list.update(changes)?;
    session.record(&event)?;

    if output.is_json() {
        output.data(&event);
        return Ok(());
    }

    for line in event.tasks() {
        output.success(&format!("Completed: {}", line));
    }

    Ok(())
}

/// Renders the completed form of a line
///
/// A completion date needs a creation date after it, so a line without one
/// only gains the `x ` marker rather than an invented creation date.
fn completed_line(line: &str, on: NaiveDate) -> String {
    let fields = parse(line);
    if fields.created_at.is_none() {
        return format!("x {}", line.trim());
    }
    Task::from_fields(fields).completed(on).to_string()
}

fn task_at(list: &TaskList, index: usize) -> Result<&Task> {
    list.get(index).ok_or_else(|| {
        TaskListError::IndexOutOfRange {
            index,
            len: list.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_hides_done_by_default() {
        let filter = ListFilter::default();
        assert!(filter.matches(&Task::parse("2019-01-01 open")));
        assert!(!filter.matches(&Task::parse("x 2019-01-01 closed")));

        let filter = ListFilter {
            include_done: true,
            ..ListFilter::default()
        };
        assert!(filter.matches(&Task::parse("x 2019-01-01 closed")));
    }

    #[test]
    fn completed_line_keeps_dates_honest() {
        let on = NaiveDate::from_ymd_opt(2019, 1, 9).unwrap();

        assert_eq!(
            completed_line("(A) 2019-01-01 Fix bike +Home", on),
            "x (A) 2019-01-09 2019-01-01 Fix bike +Home"
        );
        assert_eq!(completed_line("(B) Water plants @home", on), "x (B) Water plants @home");
    }

    #[test]
    fn filter_by_project_and_context() {
        let filter = ListFilter {
            project: Some("Home".to_string()),
            context: Some("phone".to_string()),
            include_done: false,
        };

        assert!(filter.matches(&Task::parse("Call plumber +Home @phone")));
        assert!(!filter.matches(&Task::parse("Call plumber +Home @email")));
        assert!(!filter.matches(&Task::parse("Call plumber +Work @phone")));
    }
}
