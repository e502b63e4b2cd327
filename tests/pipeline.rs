//! End-to-end planning through the public library API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use day_assistant::fields::{Category, Priority};
use day_assistant::summary::{summarize, Mood};
use day_assistant::{ClassifierError, Error, Session, SharedClassifier, TaskAnalyzer, ZeroShotClassifier};

/// Picks a label from keywords in the task text, the way a real model
/// would be expected to for these inputs.
struct KeywordClassifier;

impl ZeroShotClassifier for KeywordClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
        let t = text.to_lowercase();
        let best = if t.contains("bug") || t.contains("crash") {
            "Bug fix"
        } else if t.contains("test") {
            "Testing"
        } else if t.contains("readme") || t.contains("docs") {
            "Documentation"
        } else if t.contains("refactor") {
            "Refactoring"
        } else if t.contains("docker") || t.contains("deploy") {
            "DevOps/Deployment"
        } else if t.contains("explore") || t.contains("learn") {
            "Learning/Research"
        } else {
            "Feature development"
        };
        let mut ranked = vec![best.to_string()];
        ranked.extend(labels.iter().filter(|l| **l != best).map(|l| l.to_string()));
        Ok(ranked)
    }
}

/// Always reports the model as still loading.
struct LoadingClassifier;

impl ZeroShotClassifier for LoadingClassifier {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
        Err(ClassifierError::Api {
            status: 503,
            message: "Model is currently loading".to_string(),
        })
    }
}

fn keyword_analyzer() -> TaskAnalyzer {
    TaskAnalyzer::new(Arc::new(KeywordClassifier))
}

#[test]
fn test_full_plan_from_messy_notes() {
    let notes = "fix login bug, update README\n• write tests for payment service; explore docker basics,\n\nrefactor user service";
    let mut session = Session::new();
    let count = session.generate_plan(&keyword_analyzer(), notes, true).unwrap();
    assert_eq!(count, 5);

    let tasks = session.tasks.tasks();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text()).collect();
    assert_eq!(
        texts,
        vec![
            "fix login bug",
            "update README",
            "- write tests for payment service",
            "explore docker basics",
            "refactor user service",
        ]
    );

    assert_eq!(tasks[0].category(), Category::BugFix);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[0].estimate(), "1–2 hours");

    assert_eq!(tasks[1].category(), Category::Documentation);
    assert_eq!(tasks[1].priority, Priority::Low);
    assert_eq!(tasks[1].estimate(), "30–60 mins");

    assert_eq!(tasks[2].category(), Category::Testing);
    assert_eq!(tasks[2].priority, Priority::Medium);

    let summary = summarize(tasks).unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.high_count, 1);
    // "docker" contains "doc"
    assert_eq!(summary.low_count, 2);
    assert_eq!(summary.mood, Mood::Balanced);
    assert_eq!(summary.start_task, "fix login bug");
}

#[test]
fn test_boost_off_keeps_bugs_at_medium() {
    let mut session = Session::new();
    session.generate_plan(&keyword_analyzer(), "fix login bug, app crash on start", false).unwrap();
    assert!(session.tasks.tasks().iter().all(|t| t.priority == Priority::Medium));

    let summary = summarize(session.tasks.tasks()).unwrap();
    assert_eq!(summary.mood, Mood::LightDay);
    assert_eq!(summary.start_task, "fix login bug");
}

#[test]
fn test_three_urgent_tasks_make_a_busy_day() {
    let mut session = Session::new();
    session
        .generate_plan(&keyword_analyzer(), "fix bug A, fix bug B, fix crash C", true)
        .unwrap();
    assert_eq!(summarize(session.tasks.tasks()).unwrap().mood, Mood::BusyIntense);
}

#[test]
fn test_empty_input_leaves_plan_alone() {
    let mut session = Session::new();
    session.generate_plan(&keyword_analyzer(), "update README", true).unwrap();

    let err = session.generate_plan(&keyword_analyzer(), " , ;\n ab", true).unwrap_err();
    assert!(matches!(err, Error::InputEmpty));
    assert_eq!(session.tasks.len(), 1);
}

#[test]
fn test_classifier_failure_leaves_plan_alone() {
    let mut session = Session::new();
    session.generate_plan(&keyword_analyzer(), "update README", true).unwrap();

    let failing = TaskAnalyzer::new(Arc::new(LoadingClassifier));
    let err = session.generate_plan(&failing, "fix login bug", true).unwrap_err();
    match err {
        Error::ClassificationUnavailable(inner) => assert!(inner.is_transient()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.tasks.get(0).map(|t| t.text()), Some("update README"));
}

#[test]
fn test_edits_then_regenerate_replaces_everything() {
    let analyzer = keyword_analyzer();
    let mut session = Session::new();
    session.generate_plan(&analyzer, "fix login bug, update README, write tests", true).unwrap();

    assert_eq!(session.tasks.toggle_done(0), Some(true));
    assert!(session.tasks.set_priority(1, Priority::High));
    assert_eq!(session.tasks.delete(&[2, 2]), 1);
    assert_eq!(session.tasks.len(), 2);

    session.generate_plan(&analyzer, "deploy to staging", true).unwrap();
    assert_eq!(session.tasks.len(), 1);
    assert!(!session.tasks.tasks()[0].done);
    assert_eq!(session.tasks.tasks()[0].category(), Category::DevOpsDeployment);
}

#[test]
fn test_shared_classifier_builds_backend_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let shared = SharedClassifier::with_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(KeywordClassifier) as Arc<dyn ZeroShotClassifier>)
    });
    assert!(!shared.is_initialized());

    let analyzer = TaskAnalyzer::new(Arc::new(shared));
    let mut session = Session::new();
    session.generate_plan(&analyzer, "fix bug, write docs, learn rust", true).unwrap();
    session.generate_plan(&analyzer, "refactor parser", true).unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}
