use handle_errors::return_error;
use warp::{Filter, http::Method};

use crate::store::Store;

pub mod quiz;

/// The full `/api/quizzes` filter tree with CORS, tracing and error recovery.
pub fn routes(
    store: Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("Content-Type")
        .allow_methods(&[Method::GET, Method::POST]);

    let quizzes = warp::path("api").and(warp::path("quizzes"));

    let get_quizzes = warp::get()
        .and(quizzes.clone())
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(quiz::get_quizzes);

    let get_quiz = warp::get()
        .and(quizzes.clone())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(quiz::get_quiz);

    let add_quiz = warp::post()
        .and(quizzes.clone())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(quiz::add_quiz);

    let submit_quiz = warp::post()
        .and(quizzes)
        .and(warp::path::param::<String>())
        .and(warp::path("submit"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(quiz::submit_quiz);

    get_quizzes
        .or(get_quiz)
        .or(add_quiz)
        .or(submit_quiz)
        .with(cors)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "quiz request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        .recover(return_error)
}
