//! # Application Layer
//!
//! Collaborator interfaces and the question-answering use case that
//! coordinates them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
