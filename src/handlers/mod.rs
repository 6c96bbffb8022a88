//! HTTP handlers for categories, questions and quizzes.

pub mod categories;
pub mod questions;
pub mod quizzes;
pub use categories::*;
pub use questions::*;
pub use quizzes::*;

use crate::error::AppError;

/// Path ids are integers; anything else is an unknown route.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("no route for id '{}'", id_str)))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("route".into())
}
