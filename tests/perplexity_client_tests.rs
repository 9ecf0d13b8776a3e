//! `PerplexityClient` against a local stand-in for the chat completions API.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Json;
use serde_json::{json, Value};

use common::spawn_server;
use heatx::{ChatClient, DomainError, PerplexityClient};

type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn upstream(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = axum::Router::new()
        .route(
            "/chat/completions",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, Json(req): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().unwrap().push((auth, req));
                    (status, body)
                },
            ),
        )
        .with_state(seen.clone());

    (spawn_server(app).await, seen)
}

#[tokio::test]
async fn sends_contract_payload_and_returns_trimmed_content() {
    let (base, seen) = upstream(
        StatusCode::OK,
        r#"{"choices":[{"message":{"role":"assistant","content":"\n<h3>Heat</h3>  "}}]}"#,
    )
    .await;
    let client = PerplexityClient::new("pplx-test", "sonar", base).unwrap();

    let answer = client.complete("SYSTEM PROMPT", "USER TURN").await.unwrap();
    assert_eq!(answer, "<h3>Heat</h3>");

    let seen = seen.lock().unwrap();
    let (auth, req) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer pplx-test"));
    assert_eq!(req["model"], "sonar");
    assert_eq!(
        req["messages"],
        json!([
            { "role": "system", "content": "SYSTEM PROMPT" },
            { "role": "user", "content": "USER TURN" },
        ])
    );
    assert_eq!(req["max_tokens"], 1024);
    assert_eq!(req["stream"], false);
    assert!((req["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let (base, _) = upstream(StatusCode::UNAUTHORIZED, r#"{"error":"invalid api key"}"#).await;
    let client = PerplexityClient::new("bad", "sonar", base).unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    match err {
        DomainError::CompletionStatus { status, ref body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_content_is_malformed_not_empty() {
    let (base, _) = upstream(StatusCode::OK, r#"{"choices":[{"message":{}}]}"#).await;
    let client = PerplexityClient::new("k", "sonar", base).unwrap();

    let err = client.complete("s", "u").await.unwrap_err();
    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PerplexityClient::new("k", "sonar", format!("http://{addr}")).unwrap();
    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, DomainError::CompletionTransport(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let app = axum::Router::new().route(
        "/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let base = spawn_server(app).await;

    let client =
        PerplexityClient::with_timeout("k", "sonar", base, Duration::from_millis(200)).unwrap();
    let err = client.complete("s", "u").await.unwrap_err();
    assert!(matches!(err, DomainError::CompletionTransport(_)));
}
