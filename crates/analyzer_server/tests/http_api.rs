//! Router-level tests: every route driven through `build_app` with a scripted provider.

mod common;

use std::time::Duration;

use analyzer_llms::{InferenceConfig, InferenceProvider};
use analyzer_server::{AppState, Variant, build_app};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{FakeProvider, MODEL, Reply, app_with, config, post_json, send};
use serde_json::{Value, json};

fn events(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({ "date": format!("2025-01-{:02}", i % 28 + 1), "text": format!("event {i}") }))
        .collect()
}

fn report_body(n: usize) -> String {
    json!({
        "events": events(n),
        "priceData": {
            "btc": { "open": 100, "close": 110 },
            "eth": { "open": 0, "close": 2500 }
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_health_reports_model_without_calling_provider() {
    let provider = FakeProvider::text("unused");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["model"], MODEL);
    let ts = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    assert!(ts.ends_with('Z'));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_report_missing_fields_is_400_without_call() {
    let provider = FakeProvider::text("unused");

    for body in ["{}", "", r#"{"events": []}"#, r#"{"priceData": {}}"#] {
        let (app, _) = app_with(Variant::Report, provider.clone());
        let (status, json) = send(app, post_json("/analyze", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert_eq!(json["error"], "Missing events or priceData");
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_report_returns_text_and_truncates_events() {
    let provider = FakeProvider::text("<think>x</think>Bitcoin looks strong.");
    let (app, _) = app_with(Variant::Report, provider.clone());

    let (status, body) = send(app, post_json("/analyze", &report_body(60))).await;

    assert_eq!(status, StatusCode::OK);
    // Report text is returned untouched
    assert_eq!(body, json!({ "analysis": "<think>x</think>Bitcoin looks strong." }));
    assert_eq!(provider.calls(), 1);

    let request = provider.last_request();
    assert_eq!(request.options.max_tokens, Some(2048));
    assert_eq!(request.options.temperature, None);
    assert_eq!(request.model, MODEL);
    assert_eq!(request.messages.len(), 1);

    let prompt = &request.messages[0].content;
    assert!(prompt.contains("event 49"));
    assert!(!prompt.contains("event 50"));
    assert!(prompt.contains("(Plus 10 more)"));
    assert!(prompt.contains("Change 10.00%"));
    assert!(prompt.contains("Change N/A"));
}

#[tokio::test]
async fn test_report_empty_reply_is_empty_analysis() {
    let (app, _) = app_with(Variant::Report, FakeProvider::text(""));

    let (status, body) = send(app, post_json("/analyze", &report_body(1))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "analysis": "" }));
}

#[tokio::test]
async fn test_report_variant_has_no_economic_route() {
    let (app, _) = app_with(Variant::Report, FakeProvider::text("unused"));
    let response_status = send(app, post_json("/analyze-economic", "{}")).await.0;
    assert_eq!(response_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_structured_parses_fenced_reply() {
    let reply = "<think>\nLet me consider {this}.\n</think>\n```json\n{\"marketSentiment\": {\"overall\": \"Bullish\", \"confidence\": 72}}\n```";
    let provider = FakeProvider::text(reply);
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let body = json!({ "events": events(3), "uploadedFiles": [{}, {}] }).to_string();
    let (status, json) = send(app, post_json("/analyze", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["analysis"],
        json!({ "marketSentiment": { "overall": "Bullish", "confidence": 72 } })
    );
    assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());

    let request = provider.last_request();
    assert_eq!(request.options.max_tokens, Some(2048));
    assert_eq!(request.options.temperature, Some(0.7));
    let prompt = &request.messages[0].content;
    assert!(prompt.contains("\"eventsAnalyzed\": 3"));
    assert!(prompt.contains("UPLOADED FILES: 2 files uploaded for analysis"));
}

#[tokio::test]
async fn test_structured_accepts_empty_body() {
    let provider = FakeProvider::text("{}");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let (status, json) = send(app, post_json("/analyze", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["analysis"], json!({}));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_structured_accepts_loose_field_types() {
    let provider = FakeProvider::text("{}");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let body = json!({
        "events": [
            { "date": "2025-01-01", "text": null },
            { "date": 20250102, "text": "x" }
        ],
        "economicData": {
            "unemployment": 4.1,
            "cpi": { "value": "3.1", "change": "+0.2" }
        }
    })
    .to_string();
    let (status, json) = send(app, post_json("/analyze", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let prompt = &provider.last_request().messages[0].content;
    assert!(prompt.contains("1. [2025-01-01] \n"));
    assert!(prompt.contains("2. [20250102] x"));
    assert!(prompt.contains("- Unemployment Rate: N/A% (Change: N/A)"));
    assert!(prompt.contains("- CPI Inflation: 3.1% (Change: +0.2)"));
}

#[tokio::test]
async fn test_structured_fallback_keeps_raw_reply() {
    let reply = "<think>hmm</think>I cannot produce JSON today.";
    let (app, _) = app_with(Variant::Structured, FakeProvider::text(reply));

    let (status, json) = send(app, post_json("/analyze", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["analysis"], json!({ "error": "Parsing failed", "raw": reply }));
}

#[tokio::test]
async fn test_strict_schema_policy_rejects_partial_payload() {
    let reply = r#"{"marketSentiment": {}}"#;
    let cfg = config(Variant::Structured, &[("ANALYZER_SCHEMA_POLICY", "strict")]);
    let state = AppState::new(cfg, FakeProvider::text(reply));

    let (status, json) = send(build_app(state), post_json("/analyze", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["analysis"]["error"], "Schema validation failed");
    assert_eq!(json["analysis"]["raw"], reply);
}

#[tokio::test]
async fn test_upstream_error_payload_passed_through() {
    let payload = json!({ "code": "RateLimitReached", "message": "Too many requests" });
    let provider = FakeProvider::new(Reply::ApiError(429, payload.clone()));
    let (app, _) = app_with(Variant::Structured, provider);

    let (status, json) = send(app, post_json("/analyze", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": payload }));
}

#[tokio::test]
async fn test_transport_error_is_500_with_message() {
    let provider = FakeProvider::new(Reply::Transport("connection refused".to_string()));
    let (app, _) = app_with(Variant::Report, provider);

    let (status, json) = send(app, post_json("/analyze", &report_body(1))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "connection refused" }));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let provider = FakeProvider::text("unused");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let (status, json) = send(app, post_json("/analyze", "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_economic_requires_data() {
    let provider = FakeProvider::text("unused");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let (status, json) = send(app, post_json("/analyze-economic", "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing economicData");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_economic_returns_reply_verbatim() {
    let reply = "<think>quick</think>{\"riskLevel\": \"Medium\"}";
    let provider = FakeProvider::text(reply);
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let body = json!({
        "economicData": {
            "unemployment": { "value": 4.1, "change": -0.1 },
            "fedRate": { "value": 5.25, "change": 0 }
        }
    })
    .to_string();
    let (status, json) = send(app, post_json("/analyze-economic", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "analysis": reply }));

    let request = provider.last_request();
    assert_eq!(request.options.max_tokens, Some(512));
    assert_eq!(request.options.temperature, Some(0.6));
}

#[tokio::test]
async fn test_economic_forwards_indicators_as_sent() {
    let provider = FakeProvider::text("ok");
    let (app, _) = app_with(Variant::Structured, provider.clone());

    let body = json!({
        "economicData": {
            "cpi": { "value": 3.1, "change": "+0.2", "trend": "rising" },
            "gdp": { "value": "2.8%" }
        }
    })
    .to_string();
    let (status, _) = send(app, post_json("/analyze-economic", &body)).await;

    assert_eq!(status, StatusCode::OK);
    let prompt = &provider.last_request().messages[0].content;
    assert!(prompt.contains("\"gdp\": {"));
    assert!(prompt.contains("\"change\": \"+0.2\""));
    assert!(prompt.contains("\"trend\": \"rising\""));
}

#[tokio::test]
async fn test_cors_structured_allow_list() {
    let (app, _) = app_with(Variant::Structured, FakeProvider::text("unused"));
    let allowed = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:5174")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, allowed).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5174"
    );

    let (app, _) = app_with(Variant::Structured, FakeProvider::text("unused"));
    let denied = Request::builder()
        .uri("/health")
        .header("origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, denied).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_report_is_open() {
    let (app, _) = app_with(Variant::Report, FakeProvider::text("unused"));
    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://anywhere.example")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_call() {
    let provider = FakeProvider::new(Reply::Hang);
    let (app, state) = app_with(Variant::Structured, provider.clone());

    let pending = tokio::spawn(send(app, post_json("/analyze", "{}")));
    while provider.calls() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    state.shutdown.cancel();

    let (status, json) = tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Inference call cancelled");
}

#[tokio::test]
async fn test_end_to_end_with_inference_provider() {
    let mut server = mockito::Server::new_async().await;
    let content = "<think>checking</think>\n```json\n{\"predictions\": {\"1d\": {\"direction\": \"up\"}}}\n```";
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "cmpl-1",
                "model": MODEL,
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = InferenceProvider::new(
        InferenceConfig::new("test-key")
            .with_base_url(server.url())
            .with_model(MODEL),
    )
    .unwrap();
    let state = AppState::new(config(Variant::Structured, &[]), std::sync::Arc::new(provider));

    let (status, json) = send(build_app(state), post_json("/analyze", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["analysis"]["predictions"]["1d"]["direction"], "up");
    mock.assert_async().await;
}
