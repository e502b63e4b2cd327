//! Task record data structure.
//!
//! A `TaskRecord` is one analysed line of the user's notes. The text, category
//! and estimate are fixed when the record is built; only the priority and the
//! done flag change afterwards.

use serde::Serialize;

use crate::analyzer::estimate_for;
use crate::fields::{Category, Priority};

/// A single analysed task in today's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    text: String,
    category: Category,
    pub priority: Priority,
    estimate: String,
    pub done: bool,
}

impl TaskRecord {
    /// Build a record; the estimate is looked up from the category.
    pub fn new(text: impl Into<String>, category: Category, priority: Priority) -> Self {
        TaskRecord {
            text: text.into(),
            category,
            priority,
            estimate: estimate_for(category).to_string(),
            done: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn estimate(&self) -> &str {
        &self.estimate
    }
}
