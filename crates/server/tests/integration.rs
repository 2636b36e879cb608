//! Integration tests for the symptom triage server.
//!
//! These tests construct the full Axum router via `build_app` with a
//! temp-file SQLite store and a stubbed analysis backend, and exercise the
//! HTTP endpoints with `tower::ServiceExt::oneshot` — no TCP port, no
//! network, no real Gemini credentials.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value as JsonValue, json};
use tempfile::TempDir;
use tower::ServiceExt;

use triage_core::TriageError;
use triage_server::ai::TextGenerator;
use triage_server::config::Config;
use triage_server::db::HistoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EMERGENCY_BANNER_PREFIX: &str = "🚨 URGENT:";
const GENERIC_ANALYSIS_ERROR: &str =
    "An error occurred while analyzing symptoms. Please try again.";

/// Analysis backend double that returns a canned Gemini-style response.
struct StubGenerator;

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TriageError> {
        assert!(
            prompt.contains("POSSIBLE CONDITIONS"),
            "Handler must submit the structured analysis prompt"
        );
        Ok("**Tension headache**: common and usually benign.\n\nURGENCY LEVEL:\nLow".to_string())
    }
}

/// Analysis backend double that always fails like an unreachable API.
struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, TriageError> {
        Err(TriageError::Upstream(
            "Gemini API error (503 Service Unavailable): model overloaded".to_string(),
        ))
    }
}

/// Test configuration; the Gemini key is unused because the generator is
/// injected directly.
fn test_config(api_key: Option<String>) -> Config {
    Config {
        bind_address: "0.0.0.0:0".to_string(),
        database_path: String::new(), // unused — store is already created
        gemini_api_key: String::new(),
        gemini_model: "stub".to_string(),
        api_key,
        cors_origins: vec!["*".to_string()],
        rate_limit_rps: 1000,
    }
}

/// Build the app with a fresh temp-dir store and the given backend double.
async fn test_app(generator: Arc<dyn TextGenerator>) -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = HistoryStore::new(dir.path().join("history.db"));
    store.init().await.expect("Failed to initialize store");

    let app = triage_server::build_app(store, generator, &test_config(None));
    (dir, app)
}

/// Send a request to the app and return (status, body as JSON).
async fn request(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(req).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };

    (status, body)
}

/// Build a GET request.
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a POST request with JSON body.
fn post(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Helper: submit a symptom description and assert success.
async fn check_symptoms(app: &Router, symptoms: &str) -> JsonValue {
    let (status, body) = request(app, post("/check_symptoms", json!({"symptoms": symptoms}))).await;
    assert_eq!(status, StatusCode::OK, "Unexpected failure: {body}");
    body
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_index_page() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("Symptom Triage"));
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_emergency_info_is_static() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(&app, get("/emergency_info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emergency_contacts"]["india"]["emergency"], "112 or 108");
    assert_eq!(body["emergency_contacts"]["india"]["police"], "100");
    assert_eq!(body["emergency_contacts"]["india"]["ambulance"], "102");
    assert_eq!(
        body["emergency_contacts"]["general"]["emergency"],
        "Local emergency services"
    );

    // Deterministic regardless of any other traffic
    let (_, again) = request(&app, get("/emergency_info")).await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn test_check_symptoms_success() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let body = check_symptoms(&app, "I have a mild headache since this morning").await;

    assert_eq!(body["symptoms"], "I have a mild headache since this morning");
    assert_eq!(body["has_emergency_warning"], false);

    let analysis = body["analysis"].as_str().unwrap();
    assert!(
        !analysis.contains(EMERGENCY_BANNER_PREFIX),
        "Non-emergency analysis must not carry the banner"
    );
    // Markdown bold from the backend is rewritten for the page
    assert!(analysis.contains("<strong>Tension headache</strong>"));
    assert!(!analysis.contains("**"));
}

#[tokio::test]
async fn test_check_symptoms_trims_input() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let body = check_symptoms(&app, "  persistent dry cough at night  ").await;
    assert_eq!(body["symptoms"], "persistent dry cough at night");
}

#[tokio::test]
async fn test_emergency_banner_prepended() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let body = check_symptoms(&app, "sudden chest pain radiating to my arm").await;

    assert_eq!(body["has_emergency_warning"], true);
    let analysis = body["analysis"].as_str().unwrap();
    assert!(analysis.starts_with(EMERGENCY_BANNER_PREFIX));
    // Banner and analysis are separated by a blank line
    assert!(analysis.contains("!\n\n"));
}

#[tokio::test]
async fn test_emergency_detection_is_case_insensitive() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let body = check_symptoms(&app, "CHEST PAIN since last night, getting worse").await;
    assert_eq!(body["has_emergency_warning"], true);
}

#[tokio::test]
async fn test_validation_empty() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(&app, post("/check_symptoms", json!({"symptoms": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please describe your symptoms");
}

#[tokio::test]
async fn test_validation_missing_field_defaults_to_empty() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(&app, post("/check_symptoms", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please describe your symptoms");
}

#[tokio::test]
async fn test_validation_too_short() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(&app, post("/check_symptoms", json!({"symptoms": "headache"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Please provide more detailed symptoms (at least 10 characters)"
    );
}

#[tokio::test]
async fn test_validation_too_long() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let long = "a".repeat(1001);
    let (status, body) = request(&app, post("/check_symptoms", json!({"symptoms": long}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Symptoms description too long. Please summarize to under 1000 characters."
    );
}

#[tokio::test]
async fn test_validation_denylisted_content() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, body) = request(
        &app,
        post("/check_symptoms", json!({"symptoms": "I want to kill myself"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide appropriate medical symptoms only");
}

#[tokio::test]
async fn test_validation_failure_leaves_no_record() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let (status, _) = request(&app, post("/check_symptoms", json!({"symptoms": "short"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(&app, get("/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_sanitized_and_unpersisted() {
    let (_dir, app) = test_app(Arc::new(FailingGenerator)).await;

    let (status, body) = request(
        &app,
        post(
            "/check_symptoms",
            json!({"symptoms": "I have a mild headache since this morning"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], GENERIC_ANALYSIS_ERROR);
    // No leak of upstream detail
    assert!(!body["error"].as_str().unwrap().contains("Gemini"));
    assert!(!body["error"].as_str().unwrap().contains("503"));

    // A failed analysis never produces a record
    let (_, history) = request(&app, get("/history")).await;
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_history_limit_and_order() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    for i in 0..12 {
        check_symptoms(&app, &format!("recurring symptom number {:02}", i)).await;
    }

    let (status, body) = request(&app, get("/history")).await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 10);

    // Newest first: the last submission leads, the earliest two are evicted
    assert_eq!(records[0]["symptoms"], "recurring symptom number 11");
    assert_eq!(records[9]["symptoms"], "recurring symptom number 02");

    // Timestamps are non-increasing down the list
    let timestamps: Vec<chrono::DateTime<chrono::FixedOffset>> = records
        .iter()
        .map(|r| {
            chrono::DateTime::parse_from_rfc3339(r["timestamp"].as_str().unwrap())
                .expect("Timestamp must be RFC 3339")
        })
        .collect();
    for pair in timestamps.windows(2) {
        assert!(pair[0] >= pair[1], "History must be newest first");
    }
}

#[tokio::test]
async fn test_history_record_shape() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    check_symptoms(&app, "I have a mild headache since this morning").await;

    let (_, body) = request(&app, get("/history")).await;
    let record = &body.as_array().unwrap()[0];

    assert_eq!(record["symptoms"], "I have a mild headache since this morning");
    assert!(record["response"].as_str().unwrap().contains("Tension headache"));
    assert!(record["timestamp"].is_string());
}

#[tokio::test]
async fn test_persisted_response_includes_banner() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    check_symptoms(&app, "severe bleeding from a deep cut").await;

    let (_, body) = request(&app, get("/history")).await;
    let record = &body.as_array().unwrap()[0];
    assert!(
        record["response"]
            .as_str()
            .unwrap()
            .starts_with(EMERGENCY_BANNER_PREFIX)
    );
}

#[tokio::test]
async fn test_history_storage_failure() {
    // Store pointed at a path that cannot exist: fetch degrades to a 500
    // with the fixed message instead of crashing the request.
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("missing").join("history.db"));
    let app = triage_server::build_app(store, Arc::new(StubGenerator), &test_config(None));

    let (status, body) = request(&app, get("/history")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unable to fetch history");
}

#[tokio::test]
async fn test_auth_guards_api_routes_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("history.db"));
    store.init().await.unwrap();
    let app = triage_server::build_app(
        store,
        Arc::new(StubGenerator),
        &test_config(Some("test-secret-key".to_string())),
    );

    // No API key → 401
    let (status, _) = request(&app, get("/history")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Wrong API key → 401
    let req = Request::builder()
        .method("GET")
        .uri("/history")
        .header("X-API-Key", "wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = request(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct API key → 200
    let req = Request::builder()
        .method("GET")
        .uri("/history")
        .header("X-API-Key", "test-secret-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = request(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    // Public routes stay open
    let (status, _) = request(&app, get("/emergency_info")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_header_present() {
    let (_dir, app) = test_app(Arc::new(StubGenerator)).await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("X-Request-ID"));
}
