const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Retrieved knowledge-base passages, collapsed into one prompt-ready string.
///
/// An empty context is a valid outcome meaning nothing relevant was found; it is
/// not a retrieval failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievedContext {
    text: String,
    document_count: usize,
}

impl RetrievedContext {
    /// Joins documents with a blank line, preserving the store's ranking order.
    pub fn from_documents<S: AsRef<str>>(documents: &[S]) -> Self {
        let text = documents
            .iter()
            .map(|d| d.as_ref())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);

        Self {
            text,
            document_count: documents.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
