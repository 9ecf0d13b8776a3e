use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::application::EmbeddingService;
use crate::domain::{DomainError, EmbeddingConfig};

/// Chroma's default embedding function; collections populated with it must be
/// queried with the same model.
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

pub struct OrtEmbedding {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    config: EmbeddingConfig,
}

impl OrtEmbedding {
    pub fn new(model_id: Option<&str>) -> Result<Self, DomainError> {
        let model_id = model_id.unwrap_or(DEFAULT_MODEL_ID);
        info!("Initializing ORT embedding service with model: {}", model_id);

        let api = hf_hub::api::sync::ApiBuilder::new()
            .with_progress(true)
            .build()
            .map_err(|e| DomainError::embedding(format!("Failed to create HF API: {}", e)))?;

        let repo = api.model(model_id.to_string());

        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| DomainError::embedding(format!("Failed to download tokenizer: {}", e)))?;

        let model_path = repo
            .get("model.onnx")
            .or_else(|_| repo.get("onnx/model.onnx"))
            .map_err(|e| DomainError::embedding(format!("Failed to download ONNX model: {}", e)))?;

        Self::from_paths(model_path, tokenizer_path, model_id)
    }

    pub fn from_paths(
        model_path: PathBuf,
        tokenizer_path: PathBuf,
        model_name: &str,
    ) -> Result<Self, DomainError> {
        info!("Loading ONNX model from: {:?}", model_path);

        let session = Session::builder()
            .map_err(|e| DomainError::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DomainError::embedding(format!("Failed to set optimization level: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| DomainError::embedding(format!("Failed to load ONNX model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| DomainError::embedding(format!("Failed to load tokenizer: {}", e)))?;

        let config = EmbeddingConfig::new(model_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            config,
        })
    }
}

/// Mean-pooled, L2-normalised sentence embedding for one text.
fn embed_text(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    max_seq_length: usize,
    text: &str,
) -> Result<Vec<f32>, DomainError> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| DomainError::embedding(format!("Tokenization failed: {}", e)))?;

    let len = encoding.get_ids().len().min(max_seq_length);
    let input_ids: Vec<i64> = encoding.get_ids()[..len].iter().map(|&x| x as i64).collect();
    let mask: Vec<i64> = encoding.get_attention_mask()[..len]
        .iter()
        .map(|&x| x as i64)
        .collect();
    let token_type_ids: Vec<i64> = encoding.get_type_ids()[..len]
        .iter()
        .map(|&x| x as i64)
        .collect();

    let shape = [1usize, len];
    let input_ids_tensor = Tensor::from_array((shape, input_ids))
        .map_err(|e| DomainError::embedding(format!("Failed to create input_ids tensor: {}", e)))?;
    let attention_mask_tensor = Tensor::from_array((shape, mask.clone()))
        .map_err(|e| DomainError::embedding(format!("Failed to create attention_mask tensor: {}", e)))?;
    let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids))
        .map_err(|e| DomainError::embedding(format!("Failed to create token_type_ids tensor: {}", e)))?;

    let mut session = session
        .lock()
        .map_err(|e| DomainError::embedding(format!("Failed to lock session: {}", e)))?;

    let outputs = session
        .run(ort::inputs![
            "input_ids" => input_ids_tensor,
            "attention_mask" => attention_mask_tensor,
            "token_type_ids" => token_type_ids_tensor,
        ])
        .map_err(|e| DomainError::embedding(format!("Inference failed: {}", e)))?;

    let output_value = outputs
        .iter()
        .next()
        .map(|(_, v)| v)
        .ok_or_else(|| DomainError::embedding("No output tensor found"))?;

    let (shape, data) = output_value
        .try_extract_tensor::<f32>()
        .map_err(|e| DomainError::embedding(format!("Failed to extract output tensor: {}", e)))?;

    let shape: Vec<usize> = shape.iter().map(|&x| x as usize).collect();
    debug!("Output tensor shape: {:?}", shape);

    let mut embedding = match shape.as_slice() {
        [_, seq_len, hidden_size] => {
            let mut pooled = vec![0.0f32; *hidden_size];
            let mut count = 0.0f32;
            for (j, &m) in mask.iter().enumerate().take(*seq_len) {
                if m == 0 {
                    continue;
                }
                for (k, v) in pooled.iter_mut().enumerate() {
                    *v += data[j * hidden_size + k];
                }
                count += 1.0;
            }
            if count > 0.0 {
                for v in &mut pooled {
                    *v /= count;
                }
            }
            pooled
        }
        [_, hidden_size] => data[..*hidden_size].to_vec(),
        other => {
            return Err(DomainError::embedding(format!(
                "Unexpected output tensor shape: {:?}",
                other
            )))
        }
    };

    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut embedding {
            *v /= norm;
        }
    }

    Ok(embedding)
}

#[async_trait]
impl EmbeddingService for OrtEmbedding {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let max_len = self.config.max_sequence_length();
        let text = query.to_string();

        // Inference is CPU bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || embed_text(&session, &tokenizer, max_len, &text))
            .await
            .map_err(|e| DomainError::embedding(format!("Embedding task failed: {}", e)))?
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}
