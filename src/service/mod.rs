//! Pagination, request validation and the per-endpoint trivia operations.

pub mod pagination;
mod trivia;
mod validation;
pub use pagination::{Page, QUESTIONS_PER_PAGE};
pub use trivia::{pick_unseen, TriviaService};
pub use validation::{QuestionValidator, QuizRequest, ALL_CATEGORIES};
