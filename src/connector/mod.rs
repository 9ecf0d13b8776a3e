//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Vector store (Chroma Cloud REST API)
//! - Completion service (Perplexity chat completions)
//! - Query embeddings (ONNX Runtime, or a deterministic mock)
//! - Entry points (HTTP API and CLI controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
