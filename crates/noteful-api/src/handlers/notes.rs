//! Note handlers.
//!
//! Create and update respond with the full re-hydrated representation
//! (folder embedded, tag set attached), produced by a re-read through the
//! same joined query the GET endpoints use.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use noteful_core::{CreateNoteRequest, ListNotesFilter, NoteRepository, UpdateNoteRequest};

use crate::{ApiError, AppState};

/// Query parameters for listing notes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    pub search_term: Option<String>,
    pub folder_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Request body for note create/update.
///
/// `tags` on update is optional: absent leaves the tag set untouched,
/// present replaces it entirely.
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub tags: Option<Vec<i64>>,
}

/// Validate presence of `title` before any store operation runs.
fn require_title(body: &NoteBody) -> Result<String, ApiError> {
    match &body.title {
        Some(title) if !title.trim().is_empty() => Ok(title.clone()),
        _ => Err(ApiError::BadRequest(
            "Missing `title` in request body".to_string(),
        )),
    }
}

pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ListNotesFilter {
        search_term: query.search_term,
        folder_id: query.folder_id,
        tag_id: query.tag_id,
    };

    let notes = state.db.notes.list(filter).await?;
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .db
        .notes
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Note {} not found", id)))?;
    Ok(Json(note))
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let title = require_title(&body)?;

    let req = CreateNoteRequest {
        title,
        content: body.content,
        folder_id: body.folder_id,
        tags: body.tags.unwrap_or_default(),
    };

    let id = state.db.notes.create(req).await?;

    let note = state.db.notes.get(id).await?.ok_or_else(|| {
        ApiError::Database(noteful_core::Error::Internal(format!(
            "Note {} missing immediately after insert",
            id
        )))
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/notes/{}", id))],
        Json(note),
    ))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let title = require_title(&body)?;

    let req = UpdateNoteRequest {
        title,
        content: body.content,
        folder_id: body.folder_id,
        tags: body.tags,
    };

    state.db.notes.update(id, req).await?;

    let note = state
        .db
        .notes
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Note {} not found", id)))?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
