//! Checks that turn untrusted request bodies into domain values.
//!
//! Both validators run every check and return all failures at once.

use handle_errors::FieldError;

use crate::types::quiz::{NewQuestion, NewQuiz, Question, QuestionId, Quiz, QuizId};
use crate::types::submission::{Response, Submission};

const MIN_ANSWER_CHOICES: usize = 2;

/// Title and description are stored trimmed; a blank value counts as absent.
fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Validate a quiz candidate and assign fresh ids to it and its questions.
///
/// Title uniqueness is not checked here; the store enforces it on insert.
pub fn validate_quiz(candidate: NewQuiz) -> Result<Quiz, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = trimmed(candidate.title.as_deref()).map(str::to_string);
    if title.is_none() {
        errors.push(FieldError::new("title", "Quiz title is required."));
    }

    let description = trimmed(candidate.description.as_deref()).map(str::to_string);

    let candidates = candidate.questions.unwrap_or_default();
    if candidates.is_empty() {
        errors.push(FieldError::new(
            "questions",
            "Questions must be a non-empty array.",
        ));
    }

    let mut questions = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.into_iter().enumerate() {
        if let Some(question) = validate_question(index, candidate, &mut errors) {
            questions.push(question);
        }
    }

    match title {
        Some(title) if errors.is_empty() => Ok(Quiz {
            id: QuizId::new(),
            title,
            description,
            questions,
        }),
        _ => Err(errors),
    }
}

fn validate_question(
    index: usize,
    candidate: NewQuestion,
    errors: &mut Vec<FieldError>,
) -> Option<Question> {
    let field = |name: &str| format!("questions[{}].{}", index, name);
    let before = errors.len();

    let question_text = present(candidate.question_text.as_deref());
    if question_text.is_none() {
        errors.push(FieldError::new(
            field("questionText"),
            "Question text is required.",
        ));
    }

    let answer_choices = candidate.answer_choices.unwrap_or_default();
    if answer_choices.len() < MIN_ANSWER_CHOICES {
        errors.push(FieldError::new(
            field("answerChoices"),
            "Each question must have at least two answer choices.",
        ));
    }

    // Compared untrimmed; it must match a choice exactly.
    let correct_answer = candidate.correct_answer.filter(|answer| !answer.is_empty());
    match &correct_answer {
        None => errors.push(FieldError::new(
            field("correctAnswer"),
            "Correct answer is required.",
        )),
        Some(answer) if !answer_choices.contains(answer) => errors.push(FieldError::new(
            field("correctAnswer"),
            format!(
                "Correct answer \"{}\" must be one of the answer choices for question \"{}\".",
                answer,
                question_text.unwrap_or_default()
            ),
        )),
        Some(_) => {}
    }

    if errors.len() > before {
        return None;
    }

    Some(Question {
        id: QuestionId::new(),
        question_text: question_text?.to_string(),
        answer_choices,
        correct_answer: correct_answer?,
    })
}

/// Validate a submission body into a list of responses.
///
/// Repeated answers to one question are kept; scoring counts only the first.
pub fn validate_submission(candidate: Submission) -> Result<Vec<Response>, Vec<FieldError>> {
    let mut errors = Vec::new();

    let submitted = candidate.responses.unwrap_or_default();
    if submitted.is_empty() {
        errors.push(FieldError::new(
            "responses",
            "Responses must be a non-empty array.",
        ));
    }

    let mut responses = Vec::with_capacity(submitted.len());
    for (index, response) in submitted.into_iter().enumerate() {
        let question_id = response
            .question_id
            .as_deref()
            .and_then(|id| id.parse::<QuestionId>().ok());
        if question_id.is_none() {
            errors.push(FieldError::new(
                format!("responses[{}].questionId", index),
                "Each response must have a valid questionId.",
            ));
        }

        let selected_answer = response.selected_answer.filter(|answer| !answer.is_empty());
        if selected_answer.is_none() {
            errors.push(FieldError::new(
                format!("responses[{}].selectedAnswer", index),
                "Each response must have a selectedAnswer.",
            ));
        }

        if let (Some(question_id), Some(selected_answer)) = (question_id, selected_answer) {
            responses.push(Response {
                question_id,
                selected_answer,
            });
        }
    }

    if errors.is_empty() {
        Ok(responses)
    } else {
        Err(errors)
    }
}
