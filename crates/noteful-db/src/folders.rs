//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use noteful_core::{Error, Folder, FolderRepository, Result};

/// PostgreSQL implementation of FolderRepository.
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_folder(row: sqlx::postgres::PgRow) -> Folder {
    Folder {
        id: row.get("id"),
        name: row.get("name"),
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn list(&self) -> Result<Vec<Folder>> {
        let rows = sqlx::query("SELECT id, name FROM folders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_folder).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Folder>> {
        let row = sqlx::query("SELECT id, name FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(map_folder))
    }

    async fn create(&self, name: &str) -> Result<Folder> {
        let row = sqlx::query("INSERT INTO folders (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(map_folder(row))
    }

    async fn update(&self, id: i64, name: &str) -> Result<Folder> {
        let row = sqlx::query("UPDATE folders SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(map_folder)
            .ok_or_else(|| Error::NotFound(format!("Folder {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Detach notes instead of leaving them pointing at a missing folder.
        sqlx::query("UPDATE notes SET folder_id = NULL WHERE folder_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Folder {} not found", id)));
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }
}
