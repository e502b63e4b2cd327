//! Turning task strings into analysed task records.
//!
//! Each task is classified into a [`Category`] by the zero-shot classifier.
//! Priority and the time estimate come from fixed keyword and lookup rules, so
//! they are fully deterministic given the category.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::classifier::ZeroShotClassifier;
use crate::error::ClassifierError;
use crate::fields::{Category, Priority};
use crate::task::TaskRecord;

/// Substrings that mark a task as urgent when boosting is on.
pub const URGENT_KEYWORDS: [&str; 6] = ["bug", "error", "fail", "crash", "urgent", "issue"];

/// Substrings that mark a task as low priority.
pub const LOW_PRIORITY_KEYWORDS: [&str; 5] = ["doc", "documentation", "readme", "learn", "tutorial"];

/// Estimate used for any category without a table entry.
pub const DEFAULT_ESTIMATE: &str = "1–2 hours";

/// Time estimate for a category.
pub fn estimate_for(category: Category) -> &'static str {
    match category {
        Category::BugFix => "1–2 hours",
        Category::FeatureDevelopment => "3–5 hours",
        Category::Refactoring => "2–3 hours",
        Category::Documentation => "30–60 mins",
        Category::LearningResearch => "1–2 hours",
        Category::Testing => "1–3 hours",
        Category::DevOpsDeployment => "2–4 hours",
        Category::Other => DEFAULT_ESTIMATE,
    }
}

/// Infer a priority from the task text.
///
/// Urgent keywords win (only when `boost_urgent` is set), then the low-priority
/// keywords, otherwise Medium. Matching is case-insensitive and unanchored, so
/// "debugging" counts as "bug".
pub fn infer_priority(task: &str, boost_urgent: bool) -> Priority {
    let t = task.to_lowercase();
    if boost_urgent && contains_any(&t, &URGENT_KEYWORDS) {
        Priority::High
    } else if contains_any(&t, &LOW_PRIORITY_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Classifies tasks and applies the priority and estimate rules.
#[derive(Clone)]
pub struct TaskAnalyzer {
    classifier: Arc<dyn ZeroShotClassifier>,
}

impl TaskAnalyzer {
    pub fn new(classifier: Arc<dyn ZeroShotClassifier>) -> Self {
        Self { classifier }
    }

    /// Pick the best category for `task`.
    pub fn categorize(&self, task: &str) -> Result<Category, ClassifierError> {
        let labels = Category::labels();
        let ranked = self.classifier.classify(task, &labels)?;
        let top = ranked
            .first()
            .ok_or_else(|| ClassifierError::InvalidResponse("classifier returned no labels".to_string()))?;

        Ok(Category::from_label(top).unwrap_or_else(|| {
            warn!(label = %top, "classifier returned an unknown label, filing under Other");
            Category::Other
        }))
    }

    /// Analyse a single task.
    pub fn analyze(&self, task: &str, boost_urgent: bool) -> Result<TaskRecord, ClassifierError> {
        let category = self.categorize(task)?;
        let priority = infer_priority(task, boost_urgent);
        debug!(%task, ?category, ?priority, "analyze: done");
        Ok(TaskRecord::new(task, category, priority))
    }

    /// Analyse every task, in order.
    ///
    /// Either every task is analysed or the first failure is returned and no
    /// records are produced.
    pub fn analyze_all(&self, tasks: &[String], boost_urgent: bool) -> Result<Vec<TaskRecord>, ClassifierError> {
        tasks.iter().map(|t| self.analyze(t, boost_urgent)).collect()
    }
}
