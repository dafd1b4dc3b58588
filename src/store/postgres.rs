use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;

use handle_errors::Error;

use crate::store::QuizStore;
use crate::types::quiz::{Question, Quiz, QuizId, QuizSummary};

/// Postgres error code for a violated UNIQUE constraint.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

impl PgStore {
    pub async fn new(db_url: &str, max_connections: u32) -> Result<Self, Error> {
        let db_pool = match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::event!(tracing::Level::ERROR, "Cannot connect to database: {:?}", e);
                return Err(Error::DatabaseQueryError(e));
            }
        };

        Ok(PgStore {
            connection: db_pool,
        })
    }

    pub async fn run_migrations(&self) -> Result<(), Error> {
        sqlx::migrate!()
            .run(&self.connection)
            .await
            .map_err(Error::MigrationError)
    }
}

fn quiz_from_row(row: PgRow) -> Quiz {
    let questions: Json<Vec<Question>> = row.get("questions");
    Quiz {
        id: QuizId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        questions: questions.0,
    }
}

fn classify(error: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            tracing::event!(
                tracing::Level::WARN,
                constraint = ?db_error.constraint(),
                "unique constraint violated"
            );
            return Error::DuplicateTitle;
        }
    }
    tracing::event!(tracing::Level::ERROR, "{:?}", error);
    Error::DatabaseQueryError(error)
}

#[async_trait]
impl QuizStore for PgStore {
    async fn get_quizzes(
        &self,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Vec<QuizSummary>, Error> {
        // A NULL limit is ignored by Postgres, so no pagination means everything.
        match sqlx::query(
            "SELECT id, title, description FROM quizzes
            ORDER BY created_on, id
            LIMIT $1 OFFSET $2",
        )
        .bind(limit.map(i64::from))
        .bind(i64::from(offset))
        .map(|row: PgRow| QuizSummary {
            id: QuizId(row.get("id")),
            title: row.get("title"),
            description: row.get("description"),
        })
        .fetch_all(&self.connection)
        .await
        {
            Ok(quizzes) => Ok(quizzes),
            Err(e) => Err(classify(e)),
        }
    }

    async fn get_quiz(&self, id: &QuizId) -> Result<Option<Quiz>, Error> {
        match sqlx::query(
            "SELECT id, title, description, questions FROM quizzes WHERE id = $1",
        )
        .bind(id.0)
        .map(quiz_from_row)
        .fetch_optional(&self.connection)
        .await
        {
            Ok(quiz) => Ok(quiz),
            Err(e) => Err(classify(e)),
        }
    }

    async fn add_quiz(&self, quiz: Quiz) -> Result<Quiz, Error> {
        match sqlx::query(
            "INSERT INTO quizzes (id, title, description, questions)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, questions",
        )
        .bind(quiz.id.0)
        .bind(quiz.title)
        .bind(quiz.description)
        .bind(Json(quiz.questions))
        .map(quiz_from_row)
        .fetch_one(&self.connection)
        .await
        {
            Ok(quiz) => Ok(quiz),
            Err(e) => Err(classify(e)),
        }
    }
}
