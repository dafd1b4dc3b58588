use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use handle_errors::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct QuizId(pub Uuid);

impl QuizId {
    pub fn new() -> Self {
        QuizId(Uuid::new_v4())
    }
}

impl Default for QuizId {
    fn default() -> Self {
        Self::new()
    }
}

/// Path segments arrive as plain strings so a malformed id can be reported
/// as a bad request instead of an unmatched route.
impl FromStr for QuizId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(QuizId)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

impl std::fmt::Display for QuizId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct QuestionId(pub Uuid);

impl QuestionId {
    pub fn new() -> Self {
        QuestionId(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for QuestionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(QuestionId)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub answer_choices: Vec<String>,
    pub correct_answer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Listing projection of a quiz; questions stay out of the index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
        }
    }
}

/// Request body of `POST /api/quizzes`.
///
/// Every field is optional here; missing values are reported by
/// `validation::validate_quiz` together with the other field errors.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct NewQuiz {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<NewQuestion>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question_text: Option<String>,
    pub answer_choices: Option<Vec<String>>,
    pub correct_answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_rejects_malformed_input() {
        match "not-a-uuid".parse::<QuizId>() {
            Err(Error::InvalidId(id)) => assert_eq!(id, "not-a-uuid"),
            other => panic!("expected InvalidId, got {:?}", other),
        }
    }

    #[test]
    fn quiz_id_parses_uuid() {
        let id = QuizId::new();
        assert_eq!(id.to_string().parse::<QuizId>().unwrap(), id);
    }

    #[test]
    fn question_serializes_camel_case() {
        let question = Question {
            id: QuestionId::new(),
            question_text: "2 + 2?".to_string(),
            answer_choices: vec!["3".to_string(), "4".to_string()],
            correct_answer: "4".to_string(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["questionText"], "2 + 2?");
        assert_eq!(value["answerChoices"][1], "4");
        assert_eq!(value["correctAnswer"], "4");
        assert_eq!(value["id"], question.id.0.to_string());
    }

    #[test]
    fn new_quiz_tolerates_missing_fields() {
        let new_quiz: NewQuiz = serde_json::from_str(r#"{"description": "d"}"#).unwrap();
        assert!(new_quiz.title.is_none());
        assert!(new_quiz.questions.is_none());
        assert_eq!(new_quiz.description.as_deref(), Some("d"));
    }
}
