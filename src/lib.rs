pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{AnswerQuestionUseCase, ChatClient, EmbeddingService, VectorStore};

pub use cli::Commands;

pub use connector::api::{http, Container, ContainerConfig, Router, Settings};
pub use connector::{
    ChromaCloudOptions, ChromaCloudStore, MockEmbedding, OrtEmbedding, PerplexityClient,
};

pub use domain::{
    Answer, AnswerQuery, DomainError, EmbeddingConfig, Prompt, RetrievedContext,
    NO_RESULTS_HTML, USER_INSTRUCTION,
};
