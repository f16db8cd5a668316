use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::{NewNote, NotePatch, ValidationError},
    repository::{NoteRepository, StorageError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("note {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, NoteError> {
        let note = NewNote::new(request.title.as_deref(), request.content.as_deref())?;

        let note = self.repo.create_note(note).await?;
        tracing::info!("Created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, NoteError> {
        let patch = match NotePatch::new(request.title.as_deref(), request.content.as_deref()) {
            Ok(patch) => patch,
            // an unknown id is reported ahead of a bad body
            Err(e) => {
                return match self.repo.get_one_note(id).await? {
                    Some(_) => Err(e.into()),
                    None => Err(NoteError::NotFound(id.to_owned())),
                };
            }
        };

        self.repo
            .update_note(id, patch)
            .await?
            .map(NoteResponse::from)
            .ok_or_else(|| NoteError::NotFound(id.to_owned()))
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), NoteError> {
        if self.repo.delete_note(id).await? {
            tracing::info!("Deleted note {id}");
            Ok(())
        } else {
            Err(NoteError::NotFound(id.to_owned()))
        }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, NoteError> {
        let notes = self.repo.get_all_notes().await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
