//! Folder handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use noteful_core::FolderRepository;

use crate::{ApiError, AppState};

/// Request body for folder create/update.
#[derive(Debug, Deserialize)]
pub struct FolderBody {
    pub name: Option<String>,
}

/// Validate presence of `name` before any store operation runs.
fn require_name(body: &FolderBody) -> Result<String, ApiError> {
    match &body.name {
        Some(name) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ApiError::BadRequest(
            "Missing `name` in request body".to_string(),
        )),
    }
}

pub async fn list_folders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let folders = state.db.folders.list().await?;
    Ok(Json(folders))
}

pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let folder = state
        .db
        .folders
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Folder {} not found", id)))?;
    Ok(Json(folder))
}

pub async fn create_folder(
    State(state): State<AppState>,
    Json(body): Json<FolderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_name(&body)?;
    let folder = state.db.folders.create(&name).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/folders/{}", folder.id))],
        Json(folder),
    ))
}

pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<FolderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_name(&body)?;
    let folder = state.db.folders.update(id, &name).await?;
    Ok(Json(folder))
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.folders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
