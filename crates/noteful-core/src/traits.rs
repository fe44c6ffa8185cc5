//! Repository traits for noteful abstractions.
//!
//! These traits define the interfaces the database layer must satisfy,
//! keeping handlers decoupled from the concrete PostgreSQL implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Optional filters for listing notes. Absent filters impose no constraint;
/// present filters combine with logical AND.
#[derive(Debug, Clone, Default)]
pub struct ListNotesFilter {
    /// Case-sensitive substring match against the title.
    pub search_term: Option<String>,
    /// Exact match on the note's folder.
    pub folder_id: Option<i64>,
    /// Keep only notes carrying this tag.
    pub tag_id: Option<i64>,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    /// Tag ids to associate. Duplicates are deduplicated, empty is a no-op.
    pub tags: Vec<i64>,
}

/// Request for updating a note.
///
/// `tags: Some(_)` replaces the entire tag set (delete-then-insert, not a
/// diff); `tags: None` leaves the existing set untouched.
#[derive(Debug, Clone)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub tags: Option<Vec<i64>>,
}

/// Repository for note CRUD with folder/tag hydration.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List hydrated notes matching the filter, ordered by note id ascending.
    async fn list(&self, filter: ListNotesFilter) -> Result<Vec<Note>>;

    /// Fetch one hydrated note by id.
    async fn get(&self, id: i64) -> Result<Option<Note>>;

    /// Insert a note and its tag associations in one transaction,
    /// returning the generated id.
    async fn create(&self, req: CreateNoteRequest) -> Result<i64>;

    /// Update note fields and (optionally) replace its tag set in one
    /// transaction. Errors with `Error::NotFound` when the id is absent.
    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<()>;

    /// Delete a note and its tag associations.
    /// Errors with `Error::NotFound` when the id is absent.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// FOLDER / TAG REPOSITORIES
// =============================================================================

/// Repository for folder CRUD operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Folder>>;

    async fn get(&self, id: i64) -> Result<Option<Folder>>;

    /// Insert a folder, returning the created row.
    async fn create(&self, name: &str) -> Result<Folder>;

    /// Rename a folder, returning the updated row.
    /// Errors with `Error::NotFound` when the id is absent.
    async fn update(&self, id: i64, name: &str) -> Result<Folder>;

    /// Delete a folder. Notes referencing it are detached (folder_id set to
    /// NULL) in the same transaction.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Repository for tag CRUD operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>>;

    async fn get(&self, id: i64) -> Result<Option<Tag>>;

    /// Insert a tag, returning the created row.
    async fn create(&self, name: &str) -> Result<Tag>;

    /// Rename a tag, returning the updated row.
    /// Errors with `Error::NotFound` when the id is absent.
    async fn update(&self, id: i64, name: &str) -> Result<Tag>;

    /// Delete a tag. Join rows referencing it are removed in the same
    /// transaction.
    async fn delete(&self, id: i64) -> Result<()>;
}
