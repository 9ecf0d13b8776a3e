use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::{Answer, AnswerQuery, DomainError, DEFAULT_N_RESULTS};

use super::Container;

pub const QUERY_ROUTE: &str = "/query";

fn default_n_results() -> usize {
    DEFAULT_N_RESULTS
}

/// Body of `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,

    /// Number of context documents to retrieve (default: 3, server cap: 100)
    #[serde(default = "default_n_results")]
    pub n_results: usize,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A request failure on its way out over HTTP.
///
/// Domain client errors keep their message and map to 400; unreadable bodies keep
/// the extractor's status; everything else is logged in full and summarised
/// behind a 500.
pub enum ApiError {
    Domain(DomainError),
    Body(JsonRejection),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

fn failure_kind(err: &DomainError) -> &'static str {
    if err.is_malformed_response() {
        "malformed completion response"
    } else if err.is_completion_error() {
        "completion service failure"
    } else {
        "internal failure"
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Body(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (rejection.status(), rejection.body_text())
            }
            Self::Domain(err) if err.is_client_error() => {
                warn!("Rejected request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(err) => {
                error!(kind = failure_kind(&err), "Internal server error in query handler: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {}", err.public_message()),
                )
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// `POST /query`: answer a question from the knowledge base as an HTML fragment.
///
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is waste heat recovery?","n_results":3}'
/// ```
pub async fn query_docs(
    State(container): State<Arc<Container>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Answer>, ApiError> {
    let Json(body) = payload?;
    let query = AnswerQuery::new(body.query).with_limit(body.n_results);
    let answer = container.answer_use_case().execute(query).await?;
    Ok(Json(answer))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            detail: format!("Internal server error: {}", message),
        }),
    )
        .into_response()
}

/// Build the application router around a ready container.
pub fn app(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route(QUERY_ROUTE, post(query_docs))
        .with_state(container)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
}

/// Serve until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}{}", listener.local_addr()?, QUERY_ROUTE);

    axum::serve(listener, app(container))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    Ok(())
}
