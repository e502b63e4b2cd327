//! Session state and task list operations.
//!
//! This module provides the `TaskListStore` holding today's analysed tasks and
//! the `Session` that owns it, along with table-printing helpers for the CLI.
//! Nothing here is persisted; a session lives as long as the process.

use tracing::{debug, info};

use crate::analyzer::TaskAnalyzer;
use crate::error::{Error, Result};
use crate::fields::{format_priority, Priority};
use crate::segment::segment;
use crate::task::TaskRecord;

/// Ordered, index-addressable list of today's tasks.
///
/// Indices shift down after a deletion. Operations addressed at an index that
/// no longer exists are ignored rather than treated as errors, since the UI
/// may act on a list that changed since it was drawn.
#[derive(Debug, Default, Clone)]
pub struct TaskListStore {
    tasks: Vec<TaskRecord>,
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list. Every installed record starts not done.
    pub fn replace_all(&mut self, records: Vec<TaskRecord>) {
        self.tasks = records;
        for t in self.tasks.iter_mut() {
            t.done = false;
        }
    }

    /// Set the priority of the task at `index`. Returns false if out of range.
    pub fn set_priority(&mut self, index: usize, value: Priority) -> bool {
        match self.tasks.get_mut(index) {
            Some(t) => {
                t.priority = value;
                true
            }
            None => false,
        }
    }

    /// Set the done flag of the task at `index`. Returns false if out of range.
    pub fn set_done(&mut self, index: usize, value: bool) -> bool {
        match self.tasks.get_mut(index) {
            Some(t) => {
                t.done = value;
                true
            }
            None => false,
        }
    }

    /// Flip the done flag of the task at `index`, returning the new value.
    pub fn toggle_done(&mut self, index: usize) -> Option<bool> {
        let t = self.tasks.get_mut(index)?;
        t.done = !t.done;
        Some(t.done)
    }

    /// Delete every task at the given indices in one go.
    ///
    /// Indices are removed from highest to lowest so earlier removals never
    /// shift a later target. Duplicates and out-of-range indices are ignored.
    /// Returns how many tasks were removed.
    pub fn delete(&mut self, indices: &[usize]) -> usize {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let mut removed = 0;
        for idx in sorted {
            if idx < self.tasks.len() {
                self.tasks.remove(idx);
                removed += 1;
            }
        }
        debug!(requested = indices.len(), removed, "TaskListStore::delete");
        removed
    }

    /// True when there is at least one task and every task is done.
    pub fn is_all_done(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.done)
    }

    pub fn get(&self, index: usize) -> Option<&TaskRecord> {
        self.tasks.get(index)
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// One user's planning session: a greeting name and today's task list.
#[derive(Debug, Default, Clone)]
pub struct Session {
    username: Option<String>,
    pub tasks: TaskListStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Set the greeting name. Blank names are ignored and an existing name is
    /// kept until a full reset. Returns true if the name was set.
    pub fn set_username(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.username.is_some() {
            return false;
        }
        self.username = Some(name.to_string());
        true
    }

    /// Split, analyse and install a new plan from raw notes.
    ///
    /// The current list is only replaced once every task has been analysed;
    /// on any error it is left untouched. Returns the number of tasks installed.
    pub fn generate_plan(&mut self, analyzer: &TaskAnalyzer, raw: &str, boost_urgent: bool) -> Result<usize> {
        let fragments = segment(raw);
        if fragments.is_empty() {
            return Err(Error::InputEmpty);
        }

        let records = analyzer.analyze_all(&fragments, boost_urgent)?;
        let count = records.len();
        self.tasks.replace_all(records);
        info!(count, boost_urgent, "plan generated");
        Ok(count)
    }

    /// Clear the task list but keep the greeting name.
    pub fn reset_tasks(&mut self) {
        self.tasks.replace_all(Vec::new());
    }

    /// Back to a brand new session.
    pub fn full_reset(&mut self) {
        *self = Session::default();
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[TaskRecord]) {
    println!(
        "{:<4} {:<5} {:<8} {:<20} {:<11} {}",
        "#", "Done", "Priority", "Type", "Estimate", "Task"
    );
    for (i, t) in tasks.iter().enumerate() {
        println!(
            "{:<4} {:<5} {:<8} {:<20} {:<11} {}",
            i + 1,
            if t.done { "[x]" } else { "[ ]" },
            format_priority(t.priority),
            truncate(t.category().label(), 20),
            t.estimate(),
            t.text()
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
