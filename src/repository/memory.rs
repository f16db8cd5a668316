use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    models::{NewNote, Note, NotePatch},
    repository::{NoteRepository, StorageError},
};

/// Process-local note storage, ids are issued in the same format as MongoDB.
#[derive(Default)]
pub struct InMemoryRepository {
    // insertion order, oldest first
    notes: RwLock<Vec<Note>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn get_all_notes(&self) -> Result<Vec<Note>, StorageError> {
        let mut notes: Vec<Note> = self.notes.read().await.iter().rev().cloned().collect();
        // stable, so equal timestamps keep newest-inserted first
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(notes)
    }

    async fn get_one_note(&self, id: &str) -> Result<Option<Note>, StorageError> {
        let notes = self.notes.read().await;

        Ok(notes.iter().find(|note| note.id == id).cloned())
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StorageError> {
        let note = Note {
            id: ObjectId::new().to_hex(),
            title: note.title,
            content: note.content,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.notes.write().await.push(note.clone());

        Ok(note)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StorageError> {
        let mut notes = self.notes.write().await;

        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        patch.apply(note, Utc::now());

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: &str) -> Result<bool, StorageError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| note.id != id);

        Ok(notes.len() < before)
    }
}
