//! # noteful-db
//!
//! PostgreSQL database layer for noteful.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for folders, tags, and notes
//! - Row hydration for the joined note read queries
//!
//! ## Example
//!
//! ```rust,ignore
//! use noteful_core::{CreateNoteRequest, NoteRepository};
//! use noteful_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/noteful").await?;
//!
//!     let note_id = db.notes.create(CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: Some("world".to_string()),
//!         folder_id: None,
//!         tags: vec![],
//!     }).await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```

pub mod folders;
pub mod hydrate;
pub mod notes;
pub mod pool;
pub mod tags;

// Re-export core types
pub use noteful_core::*;

// Re-export repository implementations
pub use folders::PgFolderRepository;
pub use hydrate::{hydrate_notes, NoteRow};
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use tags::PgTagRepository;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
///
/// Constructed once at startup and injected into handlers; nothing in the
/// crate keeps process-wide connection state.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD with folder/tag hydration.
    pub notes: PgNoteRepository,
    /// Folder repository.
    pub folders: PgFolderRepository,
    /// Tag repository.
    pub tags: PgTagRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            folders: PgFolderRepository::new(pool.clone()),
            tags: PgTagRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Close the pool, waiting for in-flight connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
