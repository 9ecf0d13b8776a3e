mod chroma_cloud_store;
mod mock_embedding;
mod ort_embedding;
mod perplexity_client;

pub use chroma_cloud_store::{
    ChromaCloudOptions, ChromaCloudStore, DEFAULT_BASE_URL as CHROMA_CLOUD_BASE_URL,
};
pub use mock_embedding::MockEmbedding;
pub use ort_embedding::{OrtEmbedding, DEFAULT_MODEL_ID as DEFAULT_EMBEDDING_MODEL};
pub use perplexity_client::{
    PerplexityClient, DEFAULT_BASE_URL as PERPLEXITY_BASE_URL, DEFAULT_MODEL as PERPLEXITY_MODEL,
};
