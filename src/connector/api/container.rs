use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::{AnswerQuestionUseCase, ChatClient, EmbeddingService, VectorStore};
use crate::connector::{
    ChromaCloudOptions, ChromaCloudStore, MockEmbedding, OrtEmbedding, PerplexityClient,
    PERPLEXITY_MODEL,
};

use super::Settings;

pub struct ContainerConfig {
    pub settings: Settings,
    /// Embed queries with deterministic mock vectors instead of the ONNX model.
    /// Only useful for smoke runs: results against a real collection are noise.
    pub mock_embeddings: bool,
}

/// Startup-built, read-only collaborators shared by every request.
pub struct Container {
    vector_store: Arc<dyn VectorStore>,
    chat_client: Arc<dyn ChatClient>,
}

impl Container {
    /// Resolve every collaborator up front; any failure here aborts startup.
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let settings = config.settings;

        let embedding_service: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::new())
        } else {
            debug!("Initializing ONNX embedding service...");
            let model = settings.embedding_model.clone();
            let ort = tokio::task::spawn_blocking(move || OrtEmbedding::new(Some(&model)))
                .await
                .context("Embedding model loader panicked")??;
            Arc::new(ort)
        };

        let embedding = embedding_service.config();
        info!(
            "Embedding queries with {} ({} dims)",
            embedding.model_name(),
            embedding.dimensions()
        );

        let options = ChromaCloudOptions {
            base_url: settings.chroma_base_url.clone(),
            api_key: settings.chroma_api_key.clone(),
            tenant: settings.chroma_tenant.clone(),
            database: settings.chroma_database.clone(),
            collection: settings.chroma_collection.clone(),
        };

        let store = ChromaCloudStore::connect(options, embedding_service)
            .await
            .with_context(|| {
                format!(
                    "Failed to initialize Chroma Cloud collection '{}' in database '{}'",
                    settings.chroma_collection, settings.chroma_database
                )
            })?;

        info!(
            "Connected to Chroma Cloud at {} collection {}",
            settings.chroma_base_url,
            store.collection_name()
        );

        let chat_client = PerplexityClient::new(
            settings.perplexity_api_key.clone(),
            PERPLEXITY_MODEL,
            settings.perplexity_base_url.clone(),
        )?;

        Ok(Self::with_collaborators(Arc::new(store), Arc::new(chat_client)))
    }

    /// Build a container around already constructed collaborators.
    pub fn with_collaborators(
        vector_store: Arc<dyn VectorStore>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            vector_store,
            chat_client,
        }
    }

    pub fn answer_use_case(&self) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::new(self.vector_store.clone(), self.chat_client.clone())
    }

    pub fn collection_name(&self) -> &str {
        self.vector_store.collection_name()
    }
}
