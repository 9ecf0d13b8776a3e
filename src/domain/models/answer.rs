use serde::{Deserialize, Serialize};

/// Returned when the knowledge base has nothing relevant to the question.
pub const NO_RESULTS_HTML: &str =
    "<h3>No results</h3><p>No relevant information found in the knowledge base.</p>";

/// Final HTML answer handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    answer: String,
}

impl Answer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }

    pub fn no_results() -> Self {
        Self::new(NO_RESULTS_HTML)
    }

    pub fn text(&self) -> &str {
        &self.answer
    }

    pub fn into_text(self) -> String {
        self.answer
    }

    pub fn is_no_results(&self) -> bool {
        self.answer == NO_RESULTS_HTML
    }
}
