use async_trait::async_trait;

use crate::domain::DomainError;

/// Nearest-neighbour lookup over the pre-populated knowledge base.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return the texts of at most `limit` documents closest to `query`, best
    /// match first. An empty vector means nothing relevant was found.
    async fn query(&self, query: &str, limit: usize) -> Result<Vec<String>, DomainError>;

    /// Human readable name of the backing collection, for logs.
    fn collection_name(&self) -> &str;
}
