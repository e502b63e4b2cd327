//! Zero-shot text classification.
//!
//! The analyzer only ever sees the [`ZeroShotClassifier`] trait. In the
//! application that trait is served by a [`SharedClassifier`], which builds the
//! real backend the first time it is asked to classify something and then
//! reuses it for the rest of the process.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;

/// Ranks candidate labels for a piece of text.
pub trait ZeroShotClassifier: Send + Sync {
    /// Return `labels` ordered from most to least relevant to `text`.
    ///
    /// Only the first element is guaranteed to be meaningful to callers.
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, ClassifierError>;
}

/// Hosted zero-shot classification over HTTP (Hugging Face inference API).
pub struct HfInferenceClassifier {
    url: String,
    api_key: Option<String>,
    http: Client,
}

impl HfInferenceClassifier {
    /// Create a new client from configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        debug!(model = %config.model, "HfInferenceClassifier::from_config: called");
        let api_key = config.get_api_key();
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "no API token set, sending anonymous requests");
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClassifierError::Init(e.to_string()))?;

        Ok(Self {
            url: config.model_url(),
            api_key,
            http,
        })
    }
}

impl ZeroShotClassifier for HfInferenceClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
        debug!(text_len = text.len(), label_count = labels.len(), "HfInferenceClassifier::classify: called");

        let mut request = self.http.post(&self.url).json(&build_request_body(text, labels));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(status = status.as_u16(), %message, "classification request failed");
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&body)
    }
}

/// Request body for a zero-shot classification call.
fn build_request_body(text: &str, labels: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "inputs": text,
        "parameters": {
            "candidate_labels": labels,
            "multi_label": false,
        },
    })
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The service answers in one of two shapes depending on the deployment.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked { labels: Vec<String>, scores: Vec<f64> },
    Scored(Vec<LabelScore>),
    Error { error: String },
}

/// Turn a response body into labels ordered by descending score.
fn parse_response(body: &str) -> Result<Vec<String>, ClassifierError> {
    let parsed: ZeroShotResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

    let mut scored: Vec<(String, f64)> = match parsed {
        ZeroShotResponse::Ranked { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(ClassifierError::InvalidResponse(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            labels.into_iter().zip(scores).collect()
        }
        ZeroShotResponse::Scored(items) => items.into_iter().map(|i| (i.label, i.score)).collect(),
        ZeroShotResponse::Error { error } => return Err(ClassifierError::InvalidResponse(error)),
    };

    if scored.is_empty() {
        return Err(ClassifierError::InvalidResponse("no labels returned".to_string()));
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(scored.into_iter().map(|(label, _)| label).collect())
}

type Factory = dyn Fn() -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> + Send + Sync;

/// A classifier handle that constructs its backend on first use.
///
/// Construction happens at most once successfully; concurrent first callers
/// wait on the same lock and share the one instance. A failed construction is
/// not remembered, so the next call tries again.
pub struct SharedClassifier {
    factory: Box<Factory>,
    instance: Mutex<Option<Arc<dyn ZeroShotClassifier>>>,
}

impl SharedClassifier {
    /// Lazily build an [`HfInferenceClassifier`] from `config`.
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self::with_factory(move || {
            info!(model = %config.model, "initializing zero-shot classifier");
            let classifier = HfInferenceClassifier::from_config(&config)?;
            Ok(Arc::new(classifier) as Arc<dyn ZeroShotClassifier>)
        })
    }

    /// Lazily build the backend with a custom constructor.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: Mutex::new(None),
        }
    }

    /// Whether the backend has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.instance.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Return the backend, building it first if needed.
    pub fn get(&self) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> {
        let mut guard = self
            .instance
            .lock()
            .map_err(|_| ClassifierError::Init("classifier lock poisoned".to_string()))?;

        if let Some(existing) = guard.as_ref() {
            return Ok(Arc::clone(existing));
        }

        let created = (self.factory)()?;
        *guard = Some(Arc::clone(&created));
        Ok(created)
    }
}

impl ZeroShotClassifier for SharedClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
        // the lock is released before the (slow) call
        let backend = self.get()?;
        backend.classify(text, labels)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock classifier for unit tests.
    ///
    /// Ranks `label` first unless the text contains `fail_on`, in which case
    /// it reports the model as unavailable.
    pub struct MockClassifier {
        label: String,
        fail_on: Option<String>,
        call_count: AtomicUsize,
    }

    impl MockClassifier {
        pub fn returning(label: &str) -> Self {
            Self {
                label: label.to_string(),
                fail_on: None,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Fails on every call.
        pub fn failing() -> Self {
            Self::failing_on("")
        }

        /// Fails on texts containing `needle`, returns "Other" otherwise.
        pub fn failing_on(needle: &str) -> Self {
            Self {
                label: "Other".to_string(),
                fail_on: Some(needle.to_string()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl ZeroShotClassifier for MockClassifier {
        fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(needle) = &self.fail_on {
                if text.contains(needle.as_str()) {
                    return Err(ClassifierError::Api {
                        status: 503,
                        message: "Model is currently loading".to_string(),
                    });
                }
            }
            let mut ranked = vec![self.label.clone()];
            ranked.extend(labels.iter().filter(|l| **l != self.label).map(|l| l.to_string()));
            Ok(ranked)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_ranks_label_first() {
            let mock = MockClassifier::returning("Testing");
            let ranked = mock.classify("write tests", &["Bug fix", "Testing", "Other"]).unwrap();
            assert_eq!(ranked, vec!["Testing", "Bug fix", "Other"]);
            assert_eq!(mock.call_count(), 1);
        }

        #[test]
        fn test_mock_failing() {
            let mock = MockClassifier::failing();
            assert!(mock.classify("anything", &["Other"]).is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockClassifier;
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Answer exactly one HTTP request on a local port and hand back the raw
    /// request text.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (format!("http://{addr}"), handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn local_classifier(base_url: &str) -> HfInferenceClassifier {
        HfInferenceClassifier {
            url: format!("{base_url}/m/x"),
            api_key: Some("test-token".to_string()),
            http: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn test_http_loading_model_is_transient_api_error() {
        let (base_url, server) = serve_once(
            "503 Service Unavailable",
            r#"{"error":"Model is currently loading","estimated_time":20.0}"#,
        );
        let err = local_classifier(&base_url)
            .classify("fix login bug", &["Bug fix", "Other"])
            .unwrap_err();
        server.join().unwrap();

        match &err {
            ClassifierError::Api { status, message } => {
                assert_eq!(*status, 503);
                assert_eq!(message, "Model is currently loading");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[test]
    fn test_http_success_ranks_labels_and_sends_token() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"label":"Other","score":0.1},{"label":"Bug fix","score":0.9}]"#,
        );
        let ranked = local_classifier(&base_url)
            .classify("fix login bug", &["Bug fix", "Other"])
            .unwrap();
        let request = server.join().unwrap();

        assert_eq!(ranked, vec!["Bug fix", "Other"]);
        assert!(request.starts_with("POST /m/x HTTP/1.1"), "{request}");
        assert!(request.to_lowercase().contains("authorization: bearer test-token"), "{request}");
        assert!(request.contains("candidate_labels"), "{request}");
    }

    #[test]
    fn test_http_client_error_is_not_transient() {
        let (base_url, server) = serve_once("400 Bad Request", "not json at all");
        let err = local_classifier(&base_url).classify("x", &["Other"]).unwrap_err();
        server.join().unwrap();

        assert!(matches!(&err, ClassifierError::Api { status: 400, message } if message == "not json at all"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("fix login bug", &["Bug fix", "Other"]);
        assert_eq!(body["inputs"], "fix login bug");
        assert_eq!(body["parameters"]["candidate_labels"][0], "Bug fix");
        assert_eq!(body["parameters"]["candidate_labels"][1], "Other");
        assert_eq!(body["parameters"]["multi_label"], false);
    }

    #[test]
    fn test_parse_ranked_response() {
        let body = r#"{"sequence":"fix login bug","labels":["Bug fix","Testing","Other"],"scores":[0.81,0.12,0.07]}"#;
        assert_eq!(parse_response(body).unwrap(), vec!["Bug fix", "Testing", "Other"]);
    }

    #[test]
    fn test_parse_scored_list_sorts_by_score() {
        let body = r#"[{"label":"Other","score":0.1},{"label":"Documentation","score":0.7},{"label":"Testing","score":0.2}]"#;
        assert_eq!(parse_response(body).unwrap(), vec!["Documentation", "Testing", "Other"]);
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error":"Model valhalla/distilbart-mnli-12-1 is currently loading","estimated_time":20.0}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse(msg) if msg.contains("loading")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_response("not json").is_err());
        assert!(parse_response("[]").is_err());
        assert!(parse_response(r#"{"labels":["a","b"],"scores":[0.5]}"#).is_err());
    }

    #[test]
    fn test_shared_classifier_initializes_lazily_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let shared = SharedClassifier::with_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MockClassifier::returning("Testing")) as Arc<dyn ZeroShotClassifier>)
        });

        assert!(!shared.is_initialized());
        assert_eq!(builds.load(Ordering::SeqCst), 0);

        for _ in 0..3 {
            let ranked = shared.classify("write tests", &["Testing", "Other"]).unwrap();
            assert_eq!(ranked[0], "Testing");
        }

        assert!(shared.is_initialized());
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_classifier_concurrent_first_use() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let shared = SharedClassifier::with_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Ok(Arc::new(MockClassifier::returning("Other")) as Arc<dyn ZeroShotClassifier>)
        });

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    shared.classify("task", &["Other"]).unwrap();
                });
            }
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_classifier_retries_failed_init() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let shared = SharedClassifier::with_factory(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ClassifierError::Init("backend offline".to_string()))
            } else {
                Ok(Arc::new(MockClassifier::returning("Other")) as Arc<dyn ZeroShotClassifier>)
            }
        });

        assert!(matches!(shared.classify("task", &["Other"]), Err(ClassifierError::Init(_))));
        assert!(!shared.is_initialized());
        assert!(shared.classify("task", &["Other"]).is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_config_does_not_connect_until_used() {
        let shared = SharedClassifier::from_config(ClassifierConfig::default());
        assert!(!shared.is_initialized());
    }
}
