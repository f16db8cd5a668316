use async_trait::async_trait;
use bson::{DateTime, Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, options::ReturnDocument};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    models::{NewNote, Note, NotePatch},
    repository::{NoteRepository, StorageError},
};

const COLLECTION: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NoteDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime>,
}

impl From<NoteDocument> for Note {
    fn from(document: NoteDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            title: document.title,
            content: document.content,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.map(DateTime::to_chrono),
        }
    }
}

/// Update pipeline for a patch. Supplied strings go through `$literal` so a
/// value starting with `$` is stored as text, and `updatedAt` is clamped to
/// never precede `createdAt`.
fn update_pipeline(patch: NotePatch, now: DateTime) -> Vec<Document> {
    let mut changes = Document::new();
    if let Some(title) = patch.title {
        changes.insert("title", doc! { "$literal": title });
    }
    if let Some(content) = patch.content {
        changes.insert("content", doc! { "$literal": content });
    }
    changes.insert("updatedAt", doc! { "$max": [now, "$createdAt"] });

    vec![doc! { "$set": changes }]
}

pub struct MongoRepository {
    notes: Option<Collection<NoteDocument>>,
}

impl MongoRepository {
    /// Builds the client and checks reachability in the background.
    ///
    /// Never fails: a URI the driver cannot parse leaves the repository
    /// disconnected and every call returns [`StorageError::Disconnected`].
    pub async fn connect(config: &Config) -> Self {
        let client = match Client::with_uri_str(&config.mongodb_uri).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("MongoDB connection error: {e}");
                return Self { notes: None };
            }
        };

        let database = client.database(&config.mongodb_database);
        let probe = database.clone();
        tokio::spawn(async move {
            match probe.run_command(doc! { "ping": 1 }).await {
                Ok(_) => tracing::info!("MongoDB connected, database '{}'", probe.name()),
                Err(e) => tracing::error!("MongoDB connection error: {e}"),
            }
        });

        Self {
            notes: Some(database.collection(COLLECTION)),
        }
    }

    fn collection(&self) -> Result<&Collection<NoteDocument>, StorageError> {
        self.notes.as_ref().ok_or(StorageError::Disconnected)
    }
}

#[async_trait]
impl NoteRepository for MongoRepository {
    async fn get_all_notes(&self) -> Result<Vec<Note>, StorageError> {
        let cursor = self
            .collection()?
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;

        let documents: Vec<NoteDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Note::from).collect())
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StorageError> {
        let document = NoteDocument {
            id: ObjectId::new(),
            title: note.title,
            content: note.content,
            created_at: DateTime::now(),
            updated_at: None,
        };

        self.collection()?.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StorageError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .collection()?
            .find_one_and_update(doc! { "_id": id }, update_pipeline(patch, DateTime::now()))
            .return_document(ReturnDocument::After)
            .await?;

        Ok(document.map(Note::from))
    }

    async fn get_one_note(&self, id: &str) -> Result<Option<Note>, StorageError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self.collection()?.find_one(doc! { "_id": id }).await?;

        Ok(document.map(Note::from))
    }

    async fn delete_note(&self, id: &str) -> Result<bool, StorageError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self
            .collection()?
            .delete_one(doc! { "_id": id })
            .await?;

        Ok(result.deleted_count == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uses_wire_field_names() {
        let document = NoteDocument {
            id: ObjectId::new(),
            title: "Title".to_owned(),
            content: String::new(),
            created_at: DateTime::now(),
            updated_at: None,
        };

        let raw = bson::to_document(&document).unwrap();

        assert!(raw.contains_key("_id"));
        assert!(raw.contains_key("createdAt"));
        assert!(!raw.contains_key("updatedAt"));
    }

    #[test]
    fn document_without_content_reads_as_empty() {
        let id = ObjectId::new();
        let raw = doc! { "_id": id, "title": "Title", "createdAt": DateTime::now() };

        let note = Note::from(bson::from_document::<NoteDocument>(raw).unwrap());

        assert_eq!(note.id, id.to_hex());
        assert_eq!(note.content, "");
        assert_eq!(note.updated_at, None);
    }

    #[test]
    fn update_pipeline_sets_only_supplied_fields() {
        let now = DateTime::now();
        let patch = NotePatch::new(None, Some("$price")).unwrap();

        let pipeline = update_pipeline(patch, now);

        assert_eq!(
            pipeline,
            vec![doc! { "$set": {
                "content": { "$literal": "$price" },
                "updatedAt": { "$max": [now, "$createdAt"] },
            } }]
        );
    }

    #[tokio::test]
    async fn unparsable_uri_leaves_repository_disconnected() {
        let config = Config {
            mongodb_uri: "not-a-mongodb-uri".to_owned(),
            ..Config::default()
        };

        let repo = MongoRepository::connect(&config).await;

        assert!(matches!(
            repo.get_all_notes().await,
            Err(StorageError::Disconnected)
        ));
    }
}
