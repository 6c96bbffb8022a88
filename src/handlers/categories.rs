//! Category listing and per-category question listing.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::PageQuery;
use crate::service::TriviaService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_categories(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = TriviaService::categories(state.store.as_ref()).await?;
    Ok(Json(body))
}

pub async fn category_questions(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    PageQuery(page): PageQuery,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = TriviaService::category_questions(state.store.as_ref(), id, page).await?;
    Ok(Json(body))
}
