use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Vector store query failed: {0}")]
    Retrieval(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Completion request failed: {0}")]
    CompletionTransport(String),

    #[error("Completion service returned {status}: {body}")]
    CompletionStatus { status: u16, body: String },

    #[error("Unexpected completion response format: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn retrieval(msg: impl Into<String>) -> Self {
        Self::Retrieval(msg.into())
    }

    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingError(msg.into())
    }

    pub fn completion_transport(msg: impl Into<String>) -> Self {
        Self::CompletionTransport(msg.into())
    }

    pub fn completion_status(status: u16, body: impl Into<String>) -> Self {
        Self::CompletionStatus {
            status,
            body: body.into(),
        }
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Errors caused by the caller's input rather than a downstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn is_completion_error(&self) -> bool {
        matches!(
            self,
            Self::CompletionTransport(_) | Self::CompletionStatus { .. } | Self::MalformedResponse(_)
        )
    }

    /// Summary safe to hand back to an HTTP caller.
    ///
    /// Status failures keep the status code but drop the raw upstream body, which
    /// is logged server side instead.
    pub fn public_message(&self) -> String {
        match self {
            Self::CompletionStatus { status, .. } => {
                format!("Completion service returned {status}")
            }
            other => other.to_string(),
        }
    }
}
