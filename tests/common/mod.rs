//! Shared helpers: throwaway upstream servers and counting fakes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use heatx::{ChatClient, DomainError, VectorStore};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}

/// POST a JSON body to the app in process and return status plus parsed body.
pub async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, body.to_string()).await
}

/// POST a body verbatim with a JSON content type, for payloads that are not valid JSON.
pub async fn post_raw(
    app: axum::Router,
    uri: &str,
    body: impl Into<String>,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.into()))
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub struct FakeStore {
    documents: Result<Vec<String>, String>,
    pub calls: AtomicUsize,
    pub limits: Mutex<Vec<usize>>,
}

impl FakeStore {
    pub fn returning(docs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            documents: Ok(docs.iter().map(|d| d.to_string()).collect()),
            calls: AtomicUsize::new(0),
            limits: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self {
            documents: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
            limits: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn query(&self, _query: &str, limit: usize) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.limits.lock().unwrap().push(limit);
        self.documents.clone().map_err(DomainError::retrieval)
    }

    fn collection_name(&self) -> &str {
        "fake"
    }
}

pub enum ChatReply {
    Answer(String),
    Fail(fn() -> DomainError),
    Panic,
}

pub struct FakeChat {
    reply: ChatReply,
    pub calls: AtomicUsize,
    pub systems: Mutex<Vec<String>>,
}

impl FakeChat {
    pub fn answering(text: &str) -> Arc<Self> {
        Self::with(ChatReply::Answer(text.to_string()))
    }

    pub fn with(reply: ChatReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            systems: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for FakeChat {
    async fn complete(&self, system: &str, _user: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.systems.lock().unwrap().push(system.to_string());
        match &self.reply {
            ChatReply::Answer(text) => Ok(text.clone()),
            ChatReply::Fail(make) => Err(make()),
            ChatReply::Panic => panic!("completion client exploded"),
        }
    }
}
