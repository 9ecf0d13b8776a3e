mod chat_client;
mod embedding_service;
mod vector_store;

pub use chat_client::*;
pub use embedding_service::*;
pub use vector_store::*;
