//! Tag handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use noteful_core::TagRepository;

use crate::{ApiError, AppState};

/// Request body for tag create/update.
#[derive(Debug, Deserialize)]
pub struct TagBody {
    pub name: Option<String>,
}

fn require_name(body: &TagBody) -> Result<String, ApiError> {
    match &body.name {
        Some(name) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ApiError::BadRequest(
            "Missing `name` in request body".to_string(),
        )),
    }
}

pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list().await?;
    Ok(Json(tags))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = state
        .db
        .tags
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tag {} not found", id)))?;
    Ok(Json(tag))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_name(&body)?;
    let tag = state.db.tags.create(&name).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/tags/{}", tag.id))],
        Json(tag),
    ))
}

pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_name(&body)?;
    let tag = state.db.tags.update(id, &name).await?;
    Ok(Json(tag))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.tags.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_name_rejects_missing_name() {
        let body = TagBody { name: None };
        assert!(require_name(&body).is_err());
    }

    #[test]
    fn test_require_name_passes_through_value() {
        let body = TagBody {
            name: Some("urgent".to_string()),
        };
        assert_eq!(require_name(&body).unwrap(), "urgent");
    }
}
