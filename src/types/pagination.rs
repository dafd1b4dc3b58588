use handle_errors::Error;
use std::collections::HashMap;

/// Pagination is pulled from the query parameters of `/api/quizzes`.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of quizzes to return; `None` returns all of them.
    pub limit: Option<u32>,
    /// Number of quizzes to skip from the start of the listing.
    pub offset: u32,
}

/// Extract pagination parameters from the `/api/quizzes` route.
///
/// # Example query
/// `/api/quizzes?limit=10&offset=20`
///
/// # Example usage
/// ```rust
/// use std::collections::HashMap;
/// use quiz_api::types::pagination::extract_pagination;
///
/// let mut query = HashMap::new();
/// query.insert("limit".to_string(), "1".to_string());
/// query.insert("offset".to_string(), "10".to_string());
/// let p = extract_pagination(query).unwrap();
/// assert_eq!(p.limit, Some(1));
/// assert_eq!(p.offset, 10);
/// ```
pub fn extract_pagination(params: HashMap<String, String>) -> Result<Pagination, Error> {
    match (params.get("limit"), params.get("offset")) {
        (Some(limit), Some(offset)) => Ok(Pagination {
            limit: Some(limit.parse::<u32>().map_err(Error::ParseError)?),
            offset: offset.parse::<u32>().map_err(Error::ParseError)?,
        }),
        _ => Err(Error::MissingParameters),
    }
}
