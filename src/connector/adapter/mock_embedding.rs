use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::application::EmbeddingService;
use crate::domain::{DomainError, EmbeddingConfig};

/// Offline stand-in for the ONNX model.
///
/// Vectors are unit length and seeded from the SHA-256 of the query, so a
/// question maps to the same vector on every run and every toolchain. They carry
/// no meaning; nearest neighbours against a real collection are arbitrary.
pub struct MockEmbedding {
    config: EmbeddingConfig,
}

impl MockEmbedding {
    pub fn new() -> Self {
        Self {
            config: EmbeddingConfig::new("mock-embedding"),
        }
    }
}

impl Default for MockEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

fn query_seed(query: &str) -> [u8; 32] {
    Sha256::digest(query.as_bytes()).into()
}

#[async_trait]
impl EmbeddingService for MockEmbedding {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let mut rng = StdRng::from_seed(query_seed(query));
        let mut vector: Vec<f32> = (0..self.config.dimensions())
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}
