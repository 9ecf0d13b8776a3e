/// Fixed user-turn instruction sent alongside the system prompt.
pub const USER_INSTRUCTION: &str = "Answer using the provided context and the formatting rules.";

/// Instruction prompt asking for a short, structured HTML answer.
///
/// Rendered in a single pass, so placeholder-looking text inside the context or
/// the question is never substituted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
}

impl Prompt {
    pub fn build(query: &str, context: &str) -> Self {
        let text = format!(
            "You are an expert assistant in industrial sustainability and heat-to-energy systems.\n\
Answer the user's question clearly, concisely, and in HTML format. Keep the response short (<=150 words).\n\
Formatting rules:\n\
- Single <h3> title.\n\
- <ul>/<li> with 2-5 bullet points.\n\
- <b>key terms</b> highlighted.\n\
- Closing line: <p><i>Insight:</i> ...</p>\n\
Context: {context}\n\
User Question: {query}\n\
Produce only the HTML answer (no additional commentary)."
        );

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
