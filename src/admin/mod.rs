//! Admin write path for the stream catalog.
//!
//! Every write is checked against the strict share-link shape before the
//! store is touched. Editing holds a pending reference to the record; the
//! record itself stays in the catalog until the edit is submitted.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Category, NewStream, StreamPatch, StreamRecord, DEFAULT_THUMBNAIL};
use crate::resolver::{validate_share_url, UrlValidationError};
use crate::store::{KvSlot, SlotError, StreamStore};

/// Errors from admin writes
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlValidationError),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Stream not found: {0}")]
    NotFound(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] SlotError),
}

/// Form data for adding or editing a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamForm {
    pub title: String,
    pub category: Category,
    pub url: String,

    /// Blank or missing means the default thumbnail
    pub thumbnail: Option<String>,

    /// Missing means zero
    pub viewers: Option<u64>,
}

impl StreamForm {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<Category>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            url: url.into(),
            thumbnail: None,
            viewers: None,
        }
    }

    /// Prefill a form from an existing record
    pub fn from_record(record: &StreamRecord) -> Self {
        Self {
            title: record.title.clone(),
            category: record.category.clone(),
            url: record.url.clone(),
            thumbnail: Some(record.thumbnail.clone()),
            viewers: Some(record.viewers),
        }
    }

    /// Finalize into stream data, filling defaults
    fn into_new_stream(self, default_thumbnail: &str) -> NewStream {
        let thumbnail = self
            .thumbnail
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_thumbnail.to_string());

        NewStream {
            title: self.title.trim().to_string(),
            category: self.category,
            url: self.url.trim().to_string(),
            thumbnail,
            viewers: self.viewers.unwrap_or(0),
        }
    }
}

/// Admin panel state: at most one pending edit
#[derive(Debug, Clone)]
pub struct AdminSession {
    editing: Option<u64>,
    default_thumbnail: String,
}

impl Default for AdminSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminSession {
    pub fn new() -> Self {
        Self::with_default_thumbnail(DEFAULT_THUMBNAIL)
    }

    /// Use a different thumbnail for streams submitted without one
    pub fn with_default_thumbnail(thumbnail: impl Into<String>) -> Self {
        Self {
            editing: None,
            default_thumbnail: thumbnail.into(),
        }
    }

    /// Id of the record under edit, if any
    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    /// Start editing `id` and return the prefilled form.
    ///
    /// The record stays in the catalog; `None` if the id is unknown.
    pub fn begin_edit<S: KvSlot>(&mut self, store: &StreamStore<S>, id: u64) -> Option<StreamForm> {
        let record = store.get_by_id(id)?;
        self.editing = Some(id);
        debug!(id, "Edit started");
        Some(StreamForm::from_record(record))
    }

    /// Drop the pending edit without touching the store
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing.take() {
            debug!(id, "Edit cancelled");
        }
    }

    /// Validate and submit a form: update the pending edit, or insert.
    ///
    /// A rejected form leaves both the store and the pending edit untouched.
    pub fn submit<S: KvSlot>(
        &mut self,
        store: &mut StreamStore<S>,
        form: StreamForm,
    ) -> Result<StreamRecord, AdminError> {
        validate_share_url(&form.url)?;
        if form.title.trim().is_empty() {
            return Err(AdminError::EmptyTitle);
        }

        let data = form.into_new_stream(&self.default_thumbnail);

        let record = match self.editing {
            Some(id) => {
                let updated = store
                    .update(id, StreamPatch::from(data))?
                    .ok_or(AdminError::NotFound(id))?;
                self.editing = None;
                info!(id, "Stream edit submitted");
                updated
            }
            None => store.insert(data)?,
        };

        Ok(record)
    }

    /// Delete a stream; clears the pending edit if it targeted `id`
    pub fn delete<S: KvSlot>(
        &mut self,
        store: &mut StreamStore<S>,
        id: u64,
    ) -> Result<bool, AdminError> {
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(store.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySlot, STORAGE_KEY};

    #[test]
    fn test_form_defaults() {
        let data = StreamForm::new(" X ", "hockey", "https://youtu.be/abc12345678")
            .into_new_stream("thumb");

        assert_eq!(data.title, "X");
        assert_eq!(data.thumbnail, "thumb");
        assert_eq!(data.viewers, 0);
    }

    #[test]
    fn test_blank_thumbnail_uses_default() {
        let mut form = StreamForm::new("X", "hockey", "https://youtu.be/abc12345678");
        form.thumbnail = Some("   ".to_string());

        assert_eq!(form.into_new_stream("thumb").thumbnail, "thumb");
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut store = StreamStore::open(MemorySlot::new());
        let mut admin = AdminSession::new();

        let result = admin.submit(&mut store, StreamForm::new("  ", "hockey", "https://youtu.be/abc12345678"));
        assert!(matches!(result, Err(AdminError::EmptyTitle)));
        assert!(store.slot().get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let store = StreamStore::open(MemorySlot::new());
        let mut admin = AdminSession::new();

        assert!(admin.begin_edit(&store, 77).is_none());
        assert_eq!(admin.editing(), None);
    }

    #[test]
    fn test_cancel_edit_keeps_record() {
        let store = StreamStore::open(MemorySlot::new());
        let mut admin = AdminSession::new();

        let form = admin.begin_edit(&store, 3).unwrap();
        assert_eq!(form.url, "https://youtu.be/oygGdlm6T8I");
        assert_eq!(admin.editing(), Some(3));

        admin.cancel_edit();
        assert_eq!(admin.editing(), None);
        assert!(store.get_by_id(3).is_some());
    }
}
