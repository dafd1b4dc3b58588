use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::store::QuizStore;
use crate::types::quiz::{Quiz, QuizId, QuizSummary};

/// Process-local store used when no database is configured.
///
/// Quizzes are kept in insertion order, which is also the listing order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    quizzes: Arc<RwLock<Vec<Quiz>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn get_quizzes(
        &self,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Vec<QuizSummary>, Error> {
        let quizzes = self.quizzes.read().await;
        let page = quizzes.iter().skip(offset as usize);
        let summaries = match limit {
            Some(limit) => page.take(limit as usize).map(QuizSummary::from).collect(),
            None => page.map(QuizSummary::from).collect(),
        };
        Ok(summaries)
    }

    async fn get_quiz(&self, id: &QuizId) -> Result<Option<Quiz>, Error> {
        Ok(self
            .quizzes
            .read()
            .await
            .iter()
            .find(|quiz| &quiz.id == id)
            .cloned())
    }

    async fn add_quiz(&self, quiz: Quiz) -> Result<Quiz, Error> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|existing| existing.title == quiz.title) {
            return Err(Error::DuplicateTitle);
        }
        quizzes.push(quiz.clone());
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(title: &str) -> Quiz {
        Quiz {
            id: QuizId::new(),
            title: title.to_string(),
            description: Some(format!("All about {}", title)),
            questions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn add_then_get() {
        let store = MemoryStore::new();
        let added = store.add_quiz(quiz("Rust")).await.unwrap();

        let found = store.get_quiz(&added.id).await.unwrap();
        assert_eq!(found, Some(added));
        assert_eq!(store.get_quiz(&QuizId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_title_is_not_stored() {
        let store = MemoryStore::new();
        store.add_quiz(quiz("Rust")).await.unwrap();

        let err = store.add_quiz(quiz("Rust")).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateTitle));
        assert_eq!(store.get_quizzes(None, 0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_pages_in_insertion_order() {
        let store = MemoryStore::new();
        for title in ["a", "b", "c", "d"] {
            store.add_quiz(quiz(title)).await.unwrap();
        }

        let titles = |page: Vec<QuizSummary>| {
            page.into_iter().map(|q| q.title).collect::<Vec<_>>()
        };
        assert_eq!(
            titles(store.get_quizzes(None, 0).await.unwrap()),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(
            titles(store.get_quizzes(Some(2), 1).await.unwrap()),
            vec!["b", "c"]
        );
        assert!(store.get_quizzes(Some(2), 10).await.unwrap().is_empty());
    }
}
