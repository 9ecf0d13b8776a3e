/// Output width of all-MiniLM-L6-v2, the model the knowledge base was indexed with.
pub const EMBEDDING_DIMENSIONS: usize = 384;
const MAX_SEQUENCE_LENGTH: usize = 256;

/// Configuration for the query embedding model.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    model_name: String,
    dimensions: usize,
    max_sequence_length: usize,
}

impl EmbeddingConfig {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            dimensions: EMBEDDING_DIMENSIONS,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }
}
