use chrono::{DateTime, Utc};

/// A note as held by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Title cannot be empty")]
    EmptyTitle,
}

/// Validated input for a note that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Result<Self, ValidationError> {
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(ValidationError::MissingTitle)?;

        Ok(Self {
            title: title.to_owned(),
            content: content.map(str::trim).unwrap_or_default().to_owned(),
        })
    }
}

/// Validated partial update. A `None` field is left untouched, while
/// `Some(String::new())` for content clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Result<Self, ValidationError> {
        let title = match title.map(str::trim) {
            Some("") => return Err(ValidationError::EmptyTitle),
            other => other.map(str::to_owned),
        };

        Ok(Self {
            title,
            content: content.map(|content| content.trim().to_owned()),
        })
    }

    /// Applies the patch in place and stamps `updated_at`.
    pub fn apply(self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        note.updated_at = Some(now.max(note.created_at));
    }
}
