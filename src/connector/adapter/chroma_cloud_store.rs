use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{EmbeddingService, VectorStore};
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.trychroma.com";
const API_PREFIX: &str = "/api/v2";
const AUTH_HEADER: &str = "x-chroma-token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a collection lives in Chroma Cloud.
#[derive(Debug, Clone)]
pub struct ChromaCloudOptions {
    pub base_url: String,
    pub api_key: String,
    pub tenant: String,
    pub database: String,
    pub collection: String,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
    name: String,
}

#[derive(serde::Serialize)]
struct QueryRequest<'a> {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: [&'a str; 1],
}

/// Read-only handle to one Chroma Cloud collection.
///
/// The collection id is resolved once in [`ChromaCloudStore::connect`]; every
/// query after that is a single REST call. Query text is embedded locally, the
/// same way Chroma's own clients do it for `query_texts`.
pub struct ChromaCloudStore {
    client: reqwest::Client,
    embedding_service: Arc<dyn EmbeddingService>,
    api_key: String,
    collection_name: String,
    /// `{base}/api/v2/tenants/{tenant}/databases/{database}/collections/{id}/query`
    query_url: String,
}

impl ChromaCloudStore {
    pub async fn connect(
        options: ChromaCloudOptions,
        embedding_service: Arc<dyn EmbeddingService>,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let collections_url = format!(
            "{}{}/tenants/{}/databases/{}/collections",
            options.base_url.trim_end_matches('/'),
            API_PREFIX,
            options.tenant,
            options.database,
        );

        let response = client
            .get(format!("{}/{}", collections_url, options.collection))
            .header(AUTH_HEADER, &options.api_key)
            .send()
            .await
            .map_err(|e| {
                DomainError::retrieval(format!(
                    "Failed to access collection '{}': {e}",
                    options.collection
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::retrieval(format!(
                "Failed to access collection '{}': {status} {body}",
                options.collection
            )));
        }

        let info: CollectionInfo = response.json().await.map_err(|e| {
            DomainError::retrieval(format!(
                "Failed to read collection '{}': {e}",
                options.collection
            ))
        })?;

        debug!("Using Chroma collection {} ({})", info.name, info.id);

        Ok(Self {
            client,
            embedding_service,
            api_key: options.api_key,
            collection_name: info.name,
            query_url: format!("{}/{}/query", collections_url, info.id),
        })
    }

    /// Read `documents[0]` from a query response.
    ///
    /// Anything unexpected (missing key, null, wrong nesting) yields no documents
    /// rather than an error; null entries inside the list are skipped.
    pub fn extract_documents(response: &Value) -> Vec<String> {
        response
            .get("documents")
            .and_then(|d| d.as_array())
            .and_then(|batches| batches.first())
            .and_then(|first| first.as_array())
            .map(|docs| {
                docs.iter()
                    .filter_map(|d| d.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl VectorStore for ChromaCloudStore {
    async fn query(&self, query: &str, limit: usize) -> Result<Vec<String>, DomainError> {
        let embedding = self
            .embedding_service
            .embed_query(query)
            .await
            .map_err(|e| DomainError::retrieval(format!("Failed to embed query: {e}")))?;

        let request = QueryRequest {
            query_embeddings: vec![embedding],
            n_results: limit,
            include: ["documents"],
        };

        let response = self
            .client
            .post(&self.query_url)
            .header(AUTH_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::retrieval(format!("{status} {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::retrieval(format!("Failed to read response: {e}")))?;

        let value: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                warn!("Unexpected Chroma response ({e}); treating as no documents");
                return Ok(vec![]);
            }
        };

        let documents = Self::extract_documents(&value);
        debug!(
            "Chroma returned {} documents from {}",
            documents.len(),
            self.collection_name
        );
        Ok(documents)
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }
}
