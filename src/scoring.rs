use std::collections::{HashMap, HashSet};

use crate::types::quiz::{QuestionId, Quiz};
use crate::types::submission::{Response, ScoreResult};

/// Score a set of responses against a quiz.
///
/// A response counts when its question exists in the quiz and the selected
/// answer matches the correct answer exactly. Responses to unknown
/// questions are ignored, and only the first answer to a question is
/// considered. A quiz without questions scores `"0.00"`.
pub fn score(quiz: &Quiz, responses: &[Response]) -> ScoreResult {
    let correct_answers: HashMap<&QuestionId, &str> = quiz
        .questions
        .iter()
        .map(|question| (&question.id, question.correct_answer.as_str()))
        .collect();

    let mut answered = HashSet::new();
    let score = responses
        .iter()
        .filter(|response| answered.insert(response.question_id))
        .filter(|response| {
            correct_answers
                .get(&response.question_id)
                .is_some_and(|correct| *correct == response.selected_answer)
        })
        .count();

    let total_questions = quiz.questions.len();

    ScoreResult {
        score,
        total_questions,
        percentage: percentage(score, total_questions),
    }
}

fn percentage(score: usize, total: usize) -> String {
    if total == 0 {
        return format!("{:.2}", 0.0);
    }
    format!("{:.2}", score as f64 / total as f64 * 100.0)
}
