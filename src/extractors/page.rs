//! Extract the `page` query parameter. Never rejects: unusable values mean page 1.

use crate::service::Page;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default)]
pub struct PageQuery(pub Page);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .map(|Query(params)| Page::parse(params.get("page").map(String::as_str)))
            .unwrap_or_default();
        Ok(PageQuery(page))
    }
}
