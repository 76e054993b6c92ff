//! Summary scenarios against a mock generation service

mod common;

use common::{memory_repository, FakeClipboard, FakeUrlOpener, RecordingNotifier};
use gleaner::{
    EnrichmentError, EnrichmentOutcome, GeminiClient, HighlightRecord, PopupHost, PopupSession,
    Severity, Summarizer, SummaryConfig, SummaryError,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SummaryConfig {
    SummaryConfig::new(
        "integration-key",
        format!("{}/models", server.uri()),
        format!("{}/generate", server.uri()),
    )
}

async fn mount_models_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(server)
        .await;
}

struct Popup {
    session: PopupSession,
    notifier: Arc<RecordingNotifier>,
    clipboard: Arc<FakeClipboard>,
    opener: Arc<FakeUrlOpener>,
}

fn popup(repository: gleaner::HighlightRepository, summarizer: Arc<dyn Summarizer>) -> Popup {
    let notifier = Arc::new(RecordingNotifier::default());
    let clipboard = Arc::new(FakeClipboard::default());
    let opener = Arc::new(FakeUrlOpener::default());
    let host = PopupHost {
        notifier: notifier.clone(),
        clipboard: clipboard.clone(),
        opener: opener.clone(),
    };
    Popup {
        session: PopupSession::open(repository, summarizer, host),
        notifier,
        clipboard,
        opener,
    }
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::new(config_for(&server));
    let err = client.summarize("").await.unwrap_err();

    assert_eq!(err, SummaryError::EmptyInput);
}

#[tokio::test]
async fn no_candidates_leaves_summary_absent_in_storage() {
    let server = MockServer::start().await;
    mount_models_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (repository, _) = memory_repository();
    let target = HighlightRecord::new("A passage with no summary", "https://example.com", "Example");
    repository.create(target.clone()).unwrap();
    let p = popup(repository.clone(), Arc::new(GeminiClient::new(config_for(&server))));

    let err = p.session.summarize(&target.id).await.unwrap_err();

    assert!(matches!(err, EnrichmentError::Summary(SummaryError::EmptyResult)));
    assert!(repository.get(&target.id).unwrap().summary.is_none());
    assert!(!p.session.coordinator().is_requesting(&target.id));
    assert_eq!(p.notifier.seen()[0].1, Severity::Error);
}

#[tokio::test]
async fn generated_summary_is_stored_shown_and_clearable() {
    let server = MockServer::start().await;
    mount_models_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "  Concise summary.  "}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (repository, _) = memory_repository();
    let other = HighlightRecord::new("Unrelated passage", "https://other.test", "Other");
    let target = HighlightRecord::new("Passage to summarize", "https://example.com", "Example");
    repository.create(other.clone()).unwrap();
    repository.create(target.clone()).unwrap();
    let p = popup(repository.clone(), Arc::new(GeminiClient::new(config_for(&server))));

    let outcome = p.session.summarize(&target.id).await.unwrap();
    assert_eq!(outcome, EnrichmentOutcome::Applied("Concise summary.".to_string()));
    assert_eq!(
        repository.get(&target.id).unwrap().summary.as_deref(),
        Some("Concise summary.")
    );
    assert!(p.session.coordinator().is_expanded(&target.id));
    assert_eq!(repository.get(&other.id).unwrap(), other);

    assert!(p.session.clear_summary(&target.id).unwrap());
    let cleared = repository.get(&target.id).unwrap();
    assert_eq!(cleared, target);
}

#[tokio::test]
async fn rejected_key_never_reaches_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (repository, blobs) = memory_repository();
    let target = HighlightRecord::new("Passage", "https://example.com", "Example");
    repository.create(target.clone()).unwrap();
    let writes = blobs.write_count();
    let p = popup(repository, Arc::new(GeminiClient::new(config_for(&server))));

    let err = p.session.summarize(&target.id).await.unwrap_err();

    assert!(matches!(err, EnrichmentError::Summary(SummaryError::Authentication(_))));
    assert_eq!(blobs.write_count(), writes);
}

#[tokio::test]
async fn copy_and_open_use_host_capabilities() {
    let (repository, _) = memory_repository();
    let target = HighlightRecord::new("Copy this passage", "https://example.com/src", "Source");
    repository.create(target.clone()).unwrap();
    let p = popup(repository, Arc::new(gleaner::MockSummarizer::succeeding("unused")));

    assert!(p.session.copy(&target.id));
    assert!(p.session.open_source(&target.id));

    assert_eq!(
        p.clipboard.contents.lock().unwrap().as_deref(),
        Some("Copy this passage")
    );
    assert_eq!(
        p.opener.opened.lock().unwrap().as_slice(),
        &["https://example.com/src".to_string()]
    );
}
