//! Success bodies, one per endpoint shape. Every body carries `success`.

use crate::model::{CategoryMap, Question};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoriesBody {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize)]
pub struct QuestionListBody {
    pub success: bool,
    pub questions: Vec<Question>,
    /// Count of every question, not just this page.
    pub total_questions: usize,
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize)]
pub struct SearchBody {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub success: bool,
    pub created: i64,
    pub question_created: String,
    /// The whole collection by ascending id, unpaginated.
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub success: bool,
    pub deleted: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsBody {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// `{success: true, question}` or, once every eligible question is used, `{success: false}`.
#[derive(Debug, Serialize)]
pub struct QuizBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

impl QuizBody {
    pub fn next(question: Option<Question>) -> Self {
        Self {
            success: question.is_some(),
            question,
        }
    }
}

/// Either branch of `POST /questions`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PostQuestionsBody {
    Search(SearchBody),
    Created(CreatedBody),
}
