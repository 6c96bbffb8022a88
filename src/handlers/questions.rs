//! Question listing, deletion, and the shared create-or-search POST.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{JsonObject, PageQuery};
use crate::response::PostQuestionsBody;
use crate::service::{QuestionValidator, TriviaService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_questions(
    State(state): State<AppState>,
    PageQuery(page): PageQuery,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = TriviaService::list_questions(state.store.as_ref(), page).await?;
    Ok(Json(body))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = TriviaService::delete_question(state.store.as_ref(), id).await?;
    Ok(Json(body))
}

/// A non-empty `searchTerm` makes this a search; otherwise the body is a new question.
pub async fn post_questions(
    State(state): State<AppState>,
    PageQuery(page): PageQuery,
    JsonObject(body): JsonObject,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let store = state.store.as_ref();
    let body = match QuestionValidator::search_term(&body) {
        Some(term) => PostQuestionsBody::Search(TriviaService::search_questions(store, term, page).await?),
        None => {
            let new = QuestionValidator::new_question(&body)?;
            PostQuestionsBody::Created(TriviaService::create_question(store, new).await?)
        }
    };
    Ok(Json(body))
}
