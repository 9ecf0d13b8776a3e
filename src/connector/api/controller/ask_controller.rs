use anyhow::Result;

use crate::domain::AnswerQuery;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, query: String, num: usize) -> Result<String> {
        let query = AnswerQuery::new(query).with_limit(num);
        let answer = self.container.answer_use_case().execute(query).await?;
        Ok(answer.into_text())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::application::{ChatClient, VectorStore};
    use crate::domain::{DomainError, NO_RESULTS_HTML};

    struct StaticStore(Vec<String>);

    #[async_trait]
    impl VectorStore for StaticStore {
        async fn query(&self, _query: &str, limit: usize) -> Result<Vec<String>, DomainError> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }

        fn collection_name(&self) -> &str {
            "static"
        }
    }

    struct EchoChat;

    #[async_trait]
    impl ChatClient for EchoChat {
        async fn complete(&self, system: &str, _user: &str) -> Result<String, DomainError> {
            let context = system
                .lines()
                .find_map(|l| l.strip_prefix("Context: "))
                .unwrap_or_default();
            Ok(format!("<h3>{context}</h3>"))
        }
    }

    #[tokio::test]
    async fn ask_limits_documents_and_returns_answer_text() {
        let store = StaticStore(vec!["first".into(), "second".into()]);
        let container = Container::with_collaborators(Arc::new(store), Arc::new(EchoChat));

        let out = AskController::new(&container)
            .ask("heat?".into(), 1)
            .await
            .unwrap();

        assert_eq!(out, "<h3>first</h3>");
    }

    #[tokio::test]
    async fn ask_with_empty_store_prints_canned_answer() {
        let container =
            Container::with_collaborators(Arc::new(StaticStore(vec![])), Arc::new(EchoChat));

        let out = AskController::new(&container)
            .ask("heat?".into(), 3)
            .await
            .unwrap();

        assert_eq!(out, NO_RESULTS_HTML);
    }

    #[tokio::test]
    async fn ask_rejects_blank_query() {
        let container =
            Container::with_collaborators(Arc::new(StaticStore(vec![])), Arc::new(EchoChat));

        let err = AskController::new(&container)
            .ask(" ".into(), 3)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Query text is empty.");
    }
}
