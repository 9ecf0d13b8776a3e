use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::application::{ChatClient, VectorStore};
use crate::domain::{Answer, AnswerQuery, DomainError, Prompt, RetrievedContext, USER_INSTRUCTION};

/// Answers a question from the knowledge base: validate, retrieve context, and
/// ask the completion service to write a short HTML answer grounded on it.
pub struct AnswerQuestionUseCase {
    vector_store: Arc<dyn VectorStore>,
    chat_client: Arc<dyn ChatClient>,
}

impl AnswerQuestionUseCase {
    pub fn new(vector_store: Arc<dyn VectorStore>, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            vector_store,
            chat_client,
        }
    }

    pub async fn execute(&self, query: AnswerQuery) -> Result<Answer, DomainError> {
        query.validate()?;

        info!(
            "Answering: {} (n_results={}, collection={})",
            query.query(),
            query.limit(),
            self.vector_store.collection_name()
        );
        let start_time = Instant::now();

        let context = self.retrieve(query.query(), query.limit()).await?;

        // An empty knowledge base hit never reaches the completion service.
        if context.is_empty() {
            info!("No context found; returning canned answer");
            return Ok(Answer::no_results());
        }

        let text = self.complete(query.query(), &context).await?;

        info!(
            "Answered from {} documents in {:.2}s",
            context.document_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Answer::new(text))
    }

    pub async fn retrieve(&self, query: &str, limit: usize) -> Result<RetrievedContext, DomainError> {
        let documents = self.vector_store.query(query, limit).await.map_err(|e| {
            error!("Vector store query failed: {}", e);
            e
        })?;

        debug!("Retrieved {} documents", documents.len());
        Ok(RetrievedContext::from_documents(&documents))
    }

    async fn complete(&self, query: &str, context: &RetrievedContext) -> Result<String, DomainError> {
        let prompt = Prompt::build(query, context.text());

        self.chat_client
            .complete(prompt.as_str(), USER_INSTRUCTION)
            .await
            .map_err(|e| {
                error!("Completion call failed: {}", e);
                e
            })
    }
}
