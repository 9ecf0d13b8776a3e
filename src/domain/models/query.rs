use crate::domain::DomainError;

/// Number of context documents retrieved when the caller does not say.
pub const DEFAULT_N_RESULTS: usize = 3;

/// Upper bound on context documents for a single question.
pub const MAX_N_RESULTS: usize = 100;

pub const EMPTY_QUERY_MESSAGE: &str = "Query text is empty.";
pub const INVALID_LIMIT_MESSAGE: &str = "n_results must be a positive integer.";

/// A caller's question plus how many context documents to pull for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerQuery {
    query: String,
    limit: usize,
}

impl AnswerQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_N_RESULTS,
        }
    }

    /// Values above [`MAX_N_RESULTS`] are clamped; zero is kept so that
    /// [`AnswerQuery::validate`] can reject it.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_N_RESULTS);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_blank() {
            return Err(DomainError::invalid_input(EMPTY_QUERY_MESSAGE));
        }
        if self.limit == 0 {
            return Err(DomainError::invalid_input(INVALID_LIMIT_MESSAGE));
        }
        Ok(())
    }
}
