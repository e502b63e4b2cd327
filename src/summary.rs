//! Rollup summary of the current plan.

use serde::Serialize;

use crate::fields::Priority;
use crate::task::TaskRecord;

/// This many High tasks or more makes for a busy day.
pub const BUSY_HIGH_COUNT: usize = 3;

/// Days with at most this many tasks are light.
pub const LIGHT_DAY_MAX_TASKS: usize = 3;

/// Overall feel of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    #[serde(rename = "busy/intense")]
    BusyIntense,
    #[serde(rename = "light day")]
    LightDay,
    #[serde(rename = "balanced")]
    Balanced,
}

impl Mood {
    /// Message shown in the summary card.
    pub fn message(self) -> &'static str {
        match self {
            Mood::BusyIntense => "🔥 Busy & intense, but manageable!",
            Mood::LightDay => "✨ Light day, great for focused work.",
            Mood::Balanced => "⚡ Balanced and productive day ahead.",
        }
    }
}

/// Aggregate view of a non-empty task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub mood: Mood,
    pub total: usize,
    pub high_count: usize,
    pub low_count: usize,
    /// Text of the task to start with.
    pub start_task: String,
}

/// Summarize a task list. Returns `None` when there is nothing to summarize.
///
/// The busy rule is checked before the light-day rule, so three High tasks
/// make a busy day no matter how short the list is.
pub fn summarize(tasks: &[TaskRecord]) -> Option<Summary> {
    let first = tasks.first()?;

    let total = tasks.len();
    let high_count = tasks.iter().filter(|t| t.priority == Priority::High).count();
    let low_count = tasks.iter().filter(|t| t.priority == Priority::Low).count();

    let mood = if high_count >= BUSY_HIGH_COUNT {
        Mood::BusyIntense
    } else if total <= LIGHT_DAY_MAX_TASKS {
        Mood::LightDay
    } else {
        Mood::Balanced
    };

    let start_task = tasks
        .iter()
        .find(|t| t.priority == Priority::High)
        .unwrap_or(first)
        .text()
        .to_string();

    Some(Summary {
        mood,
        total,
        high_count,
        low_count,
        start_task,
    })
}
