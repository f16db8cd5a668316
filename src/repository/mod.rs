mod memory;
mod mongo;

pub use memory::InMemoryRepository;
pub use mongo::MongoRepository;

use async_trait::async_trait;

use crate::models::{NewNote, Note, NotePatch};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database client was never initialised")]
    Disconnected,

    #[error("database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
}

/// Storage for the notes collection.
///
/// Lookups by an id the backend could never have issued behave like a miss.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes, newest first.
    async fn get_all_notes(&self) -> Result<Vec<Note>, StorageError>;

    async fn get_one_note(&self, id: &str) -> Result<Option<Note>, StorageError>;

    async fn create_note(&self, note: NewNote) -> Result<Note, StorageError>;

    /// Returns `None` when no note has `id`.
    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StorageError>;

    /// Returns `false` when no note has `id`.
    async fn delete_note(&self, id: &str) -> Result<bool, StorageError>;
}
