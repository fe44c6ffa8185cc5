//! Note repository implementation.
//!
//! Builds the filtered/joined read queries and runs the multi-step writes
//! (insert-then-relate, update-then-replace-relations) as single
//! transactions: commit on success, rollback on any error path.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row, Transaction};

use noteful_core::{
    CreateNoteRequest, Error, ListNotesFilter, Note, NoteRepository, Result, UpdateNoteRequest,
};

use crate::escape_like;
use crate::hydrate::{hydrate_notes, NoteRow};

/// Shared join shape for note reads: one row per (note, tag) pair, or one
/// row with null tag fields when a note has no tags. Left joins keep notes
/// with no folder or no tags in the result.
const NOTE_JOIN_SELECT: &str = "\
SELECT notes.id, notes.title, notes.content, notes.created, \
       folders.id AS folder_id, folders.name AS folder_name, \
       tags.id AS tag_id, tags.name AS tag_name \
FROM notes \
LEFT JOIN folders ON folders.id = notes.folder_id \
LEFT JOIN notes_tags ON notes_tags.note_id = notes.id \
LEFT JOIN tags ON tags.id = notes_tags.tag_id";

/// Build the list query text for the given filter.
///
/// Filters are appended conditionally with positional parameters in a fixed
/// order (search term, folder, tag); absent filters add no clause and shift
/// later parameter indexes down. The tag filter is an EXISTS subquery so a
/// matching note keeps its full tag fan-out in the result rows.
fn build_list_query(filter: &ListNotesFilter) -> String {
    let mut sql = String::from(NOTE_JOIN_SELECT);
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx = 1;

    if filter.search_term.is_some() {
        conditions.push(format!("notes.title LIKE ${} ESCAPE '\\'", param_idx));
        param_idx += 1;
    }
    if filter.folder_id.is_some() {
        conditions.push(format!("notes.folder_id = ${}", param_idx));
        param_idx += 1;
    }
    if filter.tag_id.is_some() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM notes_tags nt WHERE nt.note_id = notes.id AND nt.tag_id = ${})",
            param_idx
        ));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY notes.id ASC");
    sql
}

/// Deduplicate tag ids, preserving first-seen order.
fn dedup_tag_ids(tags: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(*t)).collect()
}

fn map_note_row(row: sqlx::postgres::PgRow) -> NoteRow {
    NoteRow {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created: row.get("created"),
        folder_id: row.get("folder_id"),
        folder_name: row.get("folder_name"),
        tag_id: row.get("tag_id"),
        tag_name: row.get("tag_name"),
    }
}

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Bulk-insert join rows for a note within an existing transaction.
    /// An empty tag set is a no-op, not an error.
    async fn insert_note_tags(
        tx: &mut Transaction<'_, Postgres>,
        note_id: i64,
        tag_ids: &[i64],
    ) -> Result<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO notes_tags (note_id, tag_id)
             SELECT $1, t FROM UNNEST($2::BIGINT[]) AS t",
        )
        .bind(note_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self, filter: ListNotesFilter) -> Result<Vec<Note>> {
        let sql = build_list_query(&filter);

        let mut query = sqlx::query(&sql);
        if let Some(term) = &filter.search_term {
            query = query.bind(format!("%{}%", escape_like(term)));
        }
        if let Some(folder_id) = filter.folder_id {
            query = query.bind(folder_id);
        }
        if let Some(tag_id) = filter.tag_id {
            query = query.bind(tag_id);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(hydrate_notes(rows.into_iter().map(map_note_row).collect()))
    }

    async fn get(&self, id: i64) -> Result<Option<Note>> {
        let sql = format!("{} WHERE notes.id = $1", NOTE_JOIN_SELECT);

        let rows = sqlx::query(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(hydrate_notes(rows.into_iter().map(map_note_row).collect()).pop())
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<i64> {
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Missing `title` in request body".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query(
            "INSERT INTO notes (title, content, folder_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.folder_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;
        let id: i64 = row.get("id");

        let tag_ids = dedup_tag_ids(req.tags);
        Self::insert_note_tags(&mut tx, id, &tag_ids).await?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<()> {
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Missing `title` in request body".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result =
            sqlx::query("UPDATE notes SET title = $1, content = $2, folder_id = $3 WHERE id = $4")
                .bind(&req.title)
                .bind(&req.content)
                .bind(req.folder_id)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }

        // Replace-all semantics: the whole prior tag set is dropped and the
        // new one inserted. Absent tags leave the set untouched.
        if let Some(tags) = req.tags {
            sqlx::query("DELETE FROM notes_tags WHERE note_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;

            let tag_ids = dedup_tag_ids(tags);
            Self::insert_note_tags(&mut tx, id, &tag_ids).await?;
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query("DELETE FROM notes_tags WHERE note_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }
}
