//! Quiz play: next random unseen question.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::service::{QuestionValidator, TriviaService};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn play_quiz(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let request = QuestionValidator::quiz(&body)?;
    let body = TriviaService::play_quiz(state.store.as_ref(), &request, &*state.rng).await?;
    Ok(Json(body))
}
