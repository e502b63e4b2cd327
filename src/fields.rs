//! Enumerations and field types for planned tasks.
//!
//! This module defines the closed set of task categories the classifier picks
//! from and the priority levels a task can carry.

use serde::{Deserialize, Serialize};

/// Kind of development work a task falls under.
///
/// The display labels double as the candidate labels handed to the zero-shot
/// classifier, so they must stay in sync with [`Category::from_label`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Bug fix")]
    BugFix,
    #[serde(rename = "Feature development")]
    FeatureDevelopment,
    #[serde(rename = "Refactoring")]
    Refactoring,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Learning/Research")]
    LearningResearch,
    #[serde(rename = "Testing")]
    Testing,
    #[serde(rename = "DevOps/Deployment")]
    DevOpsDeployment,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in the order they are offered to the classifier.
    pub const ALL: [Category; 8] = [
        Category::BugFix,
        Category::FeatureDevelopment,
        Category::Refactoring,
        Category::Documentation,
        Category::LearningResearch,
        Category::Testing,
        Category::DevOpsDeployment,
        Category::Other,
    ];

    /// Human-readable label, also used as the classifier candidate label.
    pub fn label(self) -> &'static str {
        match self {
            Category::BugFix => "Bug fix",
            Category::FeatureDevelopment => "Feature development",
            Category::Refactoring => "Refactoring",
            Category::Documentation => "Documentation",
            Category::LearningResearch => "Learning/Research",
            Category::Testing => "Testing",
            Category::DevOpsDeployment => "DevOps/Deployment",
            Category::Other => "Other",
        }
    }

    /// Map a classifier label back to its category.
    pub fn from_label(label: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Candidate labels for the classifier.
    pub fn labels() -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.label()).collect()
    }
}

/// How important a task is for today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Next priority in the High -> Medium -> Low -> High cycle.
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}
