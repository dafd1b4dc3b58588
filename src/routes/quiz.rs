use std::collections::HashMap;
use tracing::{Level, event, instrument};
use warp::http::StatusCode;

use handle_errors::Error;

use crate::scoring;
use crate::store::Store;
use crate::types::pagination::{Pagination, extract_pagination};
use crate::types::quiz::{NewQuiz, QuizId};
use crate::types::response::ApiResponse;
use crate::types::submission::Submission;
use crate::validation::{validate_quiz, validate_submission};

#[instrument(skip(store))]
pub async fn get_quizzes(
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "quiz_api", Level::INFO, "querying quizzes");
    let mut pagination = Pagination::default();

    // Unrelated query parameters (cache busters and the like) are ignored.
    if params.contains_key("limit") || params.contains_key("offset") {
        event!(Level::INFO, pagination = true);
        pagination = extract_pagination(params)?;
    }

    match store
        .get_quizzes(pagination.limit, pagination.offset)
        .await
    {
        Ok(res) => Ok(warp::reply::json(&ApiResponse::ok(res))),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn get_quiz(id: String, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let id: QuizId = id.parse()?;

    match store.get_quiz(&id).await {
        Ok(Some(quiz)) => Ok(warp::reply::json(&ApiResponse::ok(quiz))),
        Ok(None) => Err(warp::reject::custom(Error::QuizNotFound)),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store, submission))]
pub async fn submit_quiz(
    id: String,
    store: Store,
    submission: Submission,
) -> Result<impl warp::Reply, warp::Rejection> {
    let responses = validate_submission(submission).map_err(Error::Validation)?;
    let id: QuizId = id.parse()?;

    let quiz = match store.get_quiz(&id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => return Err(warp::reject::custom(Error::QuizNotFound)),
        Err(e) => return Err(warp::reject::custom(e)),
    };

    let result = scoring::score(&quiz, &responses);
    event!(
        Level::INFO,
        quiz_id = %quiz.id,
        score = result.score,
        total = result.total_questions,
        "quiz scored"
    );
    Ok(warp::reply::json(&ApiResponse::ok(result)))
}

#[instrument(skip(store, new_quiz))]
pub async fn add_quiz(
    store: Store,
    new_quiz: NewQuiz,
) -> Result<impl warp::Reply, warp::Rejection> {
    let quiz = validate_quiz(new_quiz).map_err(Error::Validation)?;

    match store.add_quiz(quiz).await {
        Ok(quiz) => {
            event!(Level::INFO, quiz_id = %quiz.id, title = %quiz.title, "quiz added");
            Ok(warp::reply::with_status(
                warp::reply::json(&ApiResponse::ok(quiz)),
                StatusCode::CREATED,
            ))
        }
        Err(e) => Err(warp::reject::custom(e)),
    }
}
