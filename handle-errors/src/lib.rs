use serde::Serialize;
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::Reject,
};

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    ParseError(std::num::ParseIntError),
    MissingParameters,
    InvalidId(String),
    QuizNotFound,
    Validation(Vec<FieldError>),
    DuplicateTitle,
    DatabaseQueryError(sqlx::Error),
    MigrationError(sqlx::migrate::MigrateError),
    ConfigError(config::ConfigError),
    InvalidAddress(std::net::AddrParseError),
}

/// A single failed check on a request field.
///
/// `field` is the path of the offending value inside the request body,
/// e.g. `questions[1].correctAnswer`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ParseError(err) => {
                write!(f, "Cannot parse parameter: {}", err)
            }
            Error::MissingParameters => {
                write!(f, "Missing parameters")
            }
            Error::InvalidId(id) => {
                write!(f, "Invalid ID format: {}", id)
            }
            Error::QuizNotFound => {
                write!(f, "Quiz not found.")
            }
            Error::Validation(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            Error::DuplicateTitle => {
                write!(f, "Duplicate field value entered: title.")
            }
            Error::DatabaseQueryError(err) => {
                write!(f, "Database query error: {}", err)
            }
            Error::MigrationError(err) => {
                write!(f, "Cannot run migration: {}", err)
            }
            Error::ConfigError(err) => {
                write!(f, "Invalid configuration: {}", err)
            }
            Error::InvalidAddress(err) => {
                write!(f, "Invalid listen address: {}", err)
            }
        }
    }
}

impl Reject for Error {}

/// JSON envelope shared by every failed response.
#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

fn with_message(
    message: impl Into<String>,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    let body = ErrorBody {
        success: false,
        message: Some(message.into()),
        errors: None,
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

fn with_errors(errors: &[FieldError]) -> warp::reply::WithStatus<warp::reply::Json> {
    let body = ErrorBody {
        success: false,
        message: None,
        errors: Some(errors),
    };
    warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(crate::Error::InvalidId(id)) = r.find() {
        event!(Level::WARN, id = %id, "Malformed quiz id");
        Ok(with_message("Invalid ID format.", StatusCode::BAD_REQUEST))
    } else if let Some(crate::Error::QuizNotFound) = r.find() {
        event!(Level::WARN, "Quiz not found");
        Ok(with_message("Quiz not found.", StatusCode::NOT_FOUND))
    } else if let Some(crate::Error::Validation(errors)) = r.find() {
        event!(Level::WARN, count = errors.len(), "Request failed validation");
        Ok(with_errors(errors))
    } else if let Some(crate::Error::DuplicateTitle) = r.find() {
        event!(Level::WARN, "Quiz title already taken");
        Ok(with_message(
            crate::Error::DuplicateTitle.to_string(),
            StatusCode::BAD_REQUEST,
        ))
    } else if let Some(crate::Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error: {}", e);
        Ok(with_message("Server Error.", StatusCode::INTERNAL_SERVER_ERROR))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(with_message(error.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::ERROR, "Cannot deserialize request body: {}", error);
        Ok(with_message(error.to_string(), StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<Error>() {
        match error {
            Error::ParseError(_) | Error::MissingParameters => {
                event!(Level::WARN, "{}", error);
                Ok(with_message(error.to_string(), StatusCode::BAD_REQUEST))
            }
            _ => {
                event!(Level::ERROR, "{}", error);
                Ok(with_message("Server Error.", StatusCode::INTERNAL_SERVER_ERROR))
            }
        }
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(with_message("Route not found", StatusCode::NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn translate(r: Rejection) -> (StatusCode, Value) {
        let res = return_error(r).await.unwrap().into_response();
        let status = res.status();
        let bytes = warp::hyper::body::to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_quiz_is_404() {
        let (status, body) = translate(warp::reject::custom(Error::QuizNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Quiz not found.");
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let (status, body) =
            translate(warp::reject::custom(Error::InvalidId("nope".to_string()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid ID format.");
    }

    #[tokio::test]
    async fn validation_errors_are_listed() {
        let errors = vec![
            FieldError::new("title", "Quiz title is required."),
            FieldError::new("questions", "Questions must be a non-empty array."),
        ];
        let (status, body) = translate(warp::reject::custom(Error::Validation(errors))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("message").is_none());
        assert_eq!(body["errors"][0]["field"], "title");
        assert_eq!(body["errors"][1]["message"], "Questions must be a non-empty array.");
    }

    #[tokio::test]
    async fn duplicate_title_is_400() {
        let (status, body) = translate(warp::reject::custom(Error::DuplicateTitle)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Duplicate field value entered: title.");
    }

    #[tokio::test]
    async fn pagination_errors_are_400() {
        let (status, _) = translate(warp::reject::custom(Error::MissingParameters)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unclassified_errors_are_500() {
        let (status, body) =
            translate(warp::reject::custom(Error::DatabaseQueryError(sqlx::Error::RowNotFound)))
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error.");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, body) = translate(warp::reject::not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
    }
}
