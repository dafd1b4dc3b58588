use async_trait::async_trait;
use std::sync::Arc;

use handle_errors::Error;

use crate::types::quiz::{Quiz, QuizId, QuizSummary};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Repository of quiz documents.
///
/// Implementations enforce title uniqueness in `add_quiz` and return
/// `Error::DuplicateTitle` without storing anything when it is violated.
#[async_trait]
pub trait QuizStore: Send + Sync + std::fmt::Debug {
    async fn get_quizzes(&self, limit: Option<u32>, offset: u32)
    -> Result<Vec<QuizSummary>, Error>;

    async fn get_quiz(&self, id: &QuizId) -> Result<Option<Quiz>, Error>;

    async fn add_quiz(&self, quiz: Quiz) -> Result<Quiz, Error>;
}

/// Shared handle passed into every route handler.
pub type Store = Arc<dyn QuizStore>;
