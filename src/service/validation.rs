//! Request body validation for question creation, search and quiz play.

use crate::error::AppError;
use crate::model::NewQuestion;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Category id meaning "every category" in a quiz request.
pub const ALL_CATEGORIES: i64 = 0;

/// A validated `POST /quizzes` body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    pub previous_questions: HashSet<i64>,
    /// `None` for the all-categories sentinel.
    pub category: Option<i64>,
}

pub struct QuestionValidator;

impl QuestionValidator {
    /// The search term when the body asks for a search: `searchTerm` present as a non-empty string.
    pub fn search_term(body: &HashMap<String, Value>) -> Option<&str> {
        body.get("searchTerm")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// All of question, answer, difficulty and category must be present and non-null.
    pub fn new_question(body: &HashMap<String, Value>) -> Result<NewQuestion, AppError> {
        let question = required_text(body, "question")?;
        let answer = required_text(body, "answer")?;
        let difficulty = required(body, "difficulty")?;
        let difficulty = as_integer(difficulty)
            .filter(|d| *d >= 1)
            .and_then(|d| i32::try_from(d).ok())
            .ok_or_else(|| AppError::Unprocessable("difficulty must be a positive integer".into()))?;
        let category = as_integer(required(body, "category")?)
            .ok_or_else(|| AppError::Unprocessable("category must be an integer id".into()))?;
        Ok(NewQuestion {
            question,
            answer,
            difficulty,
            category,
        })
    }

    /// `previous_questions` must be an array of ids; `quiz_category` an object with an `id`.
    pub fn quiz(body: &HashMap<String, Value>) -> Result<QuizRequest, AppError> {
        let previous = required(body, "previous_questions")?
            .as_array()
            .ok_or_else(|| AppError::Unprocessable("previous_questions must be an array".into()))?;
        let previous_questions = previous
            .iter()
            .map(|v| {
                as_integer(v).ok_or_else(|| {
                    AppError::Unprocessable(format!("previous_questions contains non-id {}", v))
                })
            })
            .collect::<Result<HashSet<_>, _>>()?;

        let quiz_category = required(body, "quiz_category")?;
        let id = match quiz_category.get("id") {
            None | Some(Value::Null) => {
                return Err(AppError::Unprocessable("quiz_category.id is required".into()))
            }
            Some(v) => as_integer(v)
                .ok_or_else(|| AppError::Unprocessable("quiz_category.id must be an integer".into()))?,
        };
        Ok(QuizRequest {
            previous_questions,
            category: (id != ALL_CATEGORIES).then_some(id),
        })
    }
}

fn required<'a>(body: &'a HashMap<String, Value>, field: &str) -> Result<&'a Value, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(AppError::Unprocessable(format!("{} is required", field))),
        Some(v) => Ok(v),
    }
}

fn required_text(body: &HashMap<String, Value>, field: &str) -> Result<String, AppError> {
    required(body, field)?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .ok_or_else(|| AppError::Unprocessable(format!("{} must be a non-empty string", field)))
}

/// Integer from a JSON integer, an integral float, or a string holding an integer.
fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
