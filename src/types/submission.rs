use serde::{Deserialize, Serialize};

use crate::types::quiz::QuestionId;

/// Request body of `POST /api/quizzes/:id/submit`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Submission {
    pub responses: Option<Vec<SubmittedResponse>>,
}

/// One answer as it arrives on the wire, before validation.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResponse {
    pub question_id: Option<String>,
    pub selected_answer: Option<String>,
}

/// A validated answer to one question. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub question_id: QuestionId,
    pub selected_answer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: usize,
    pub total_questions: usize,
    /// `score / total_questions * 100` with two decimals, e.g. `"50.00"`.
    pub percentage: String,
}
