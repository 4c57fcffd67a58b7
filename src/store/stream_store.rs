//! Stream catalog store with slot persistence.
//!
//! The store owns the ordered list of stream records. Every mutation
//! rewrites the whole collection into the slot as a JSON array; loading
//! falls back to the built-in catalog when the slot is empty or unreadable.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info, warn};

use super::filter::CategoryFilter;
use super::slot::{KvSlot, SlotError};
use crate::domain::{
    default_events, default_streams, EventRecord, NewStream, StreamPatch, StreamRecord,
};

/// Slot key the catalog is persisted under
pub const STORAGE_KEY: &str = "sportStreams";

/// Inclusive range of the viewer bump applied on each play
pub const VIEWER_DELTA_MIN: u64 = 1;
pub const VIEWER_DELTA_MAX: u64 = 50;

/// Stream catalog backed by a key-value slot
pub struct StreamStore<S: KvSlot> {
    slot: S,
    key: String,
    streams: Vec<StreamRecord>,
    events: Vec<EventRecord>,
    filter: CategoryFilter,

    /// Highest id ever seen or assigned in this session
    high_water: u64,
}

impl<S: KvSlot> StreamStore<S> {
    /// Open the store under the default key
    pub fn open(slot: S) -> Self {
        Self::open_with_key(slot, STORAGE_KEY)
    }

    /// Open the store under a custom key
    pub fn open_with_key(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let streams = load_streams(&slot, &key).unwrap_or_else(default_streams);
        let high_water = streams.iter().map(|s| s.id).max().unwrap_or(0);

        debug!(key = %key, count = streams.len(), "Stream store opened");

        Self {
            slot,
            key,
            streams,
            events: default_events(),
            filter: CategoryFilter::All,
            high_water,
        }
    }

    /// Slot key this store persists under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing slot
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// All records in insertion order
    pub fn all(&self) -> &[StreamRecord] {
        &self.streams
    }

    /// Records passing `filter`, insertion order preserved
    pub fn list(&self, filter: &CategoryFilter) -> Vec<&StreamRecord> {
        self.streams.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Records passing the current filter
    pub fn list_current(&self) -> Vec<&StreamRecord> {
        self.list(&self.filter)
    }

    /// Change the current filter
    pub fn select_filter(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "Category filter selected");
        self.filter = filter;
    }

    /// The current filter (`All` until something is selected)
    pub fn current_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Get a record by id
    pub fn get_by_id(&self, id: u64) -> Option<&StreamRecord> {
        self.streams.iter().find(|s| s.id == id)
    }

    /// Upcoming events (read-only)
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> u64 {
        let max_existing = self.streams.iter().map(|s| s.id).max().unwrap_or(0);
        max_existing.max(self.high_water) + 1
    }

    /// Append a new live record and persist
    pub fn insert(&mut self, data: NewStream) -> Result<StreamRecord, SlotError> {
        let id = self.next_id();
        let record = StreamRecord::from_new(id, data);

        self.streams.push(record.clone());
        self.high_water = id;
        self.persist()?;

        info!(id, title = %record.title, "Stream added");
        Ok(record)
    }

    /// Merge `patch` over the record with `id` and persist.
    ///
    /// Returns `None` without writing when the id is unknown.
    pub fn update(
        &mut self,
        id: u64,
        patch: StreamPatch,
    ) -> Result<Option<StreamRecord>, SlotError> {
        let Some(record) = self.streams.iter_mut().find(|s| s.id == id) else {
            debug!(id, "Update skipped, stream not found");
            return Ok(None);
        };

        record.apply(patch);
        let updated = record.clone();
        self.persist()?;

        info!(id, "Stream updated");
        Ok(Some(updated))
    }

    /// Remove the record with `id` and persist.
    ///
    /// Always reports `true`, whether or not a record matched.
    pub fn delete(&mut self, id: u64) -> Result<bool, SlotError> {
        let before = self.streams.len();
        self.streams.retain(|s| s.id != id);
        self.persist()?;

        if self.streams.len() < before {
            info!(id, "Stream deleted");
        } else {
            debug!(id, "Delete matched no stream");
        }
        Ok(true)
    }

    /// Bump the viewer count of `id` by a random delta and persist.
    ///
    /// Returns the applied delta, or `None` when the id is unknown.
    pub fn increment_viewer(&mut self, id: u64) -> Result<Option<u64>, SlotError> {
        let delta = rand::rng().random_range(VIEWER_DELTA_MIN..=VIEWER_DELTA_MAX);
        self.add_viewers(id, delta)
    }

    fn add_viewers(&mut self, id: u64, delta: u64) -> Result<Option<u64>, SlotError> {
        let Some(record) = self.streams.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        record.viewers = record.viewers.saturating_add(delta);
        self.persist()?;

        debug!(id, delta, "Viewer count incremented");
        Ok(Some(delta))
    }

    /// Rewrite the whole collection into the slot
    fn persist(&self) -> Result<(), SlotError> {
        let json = serde_json::to_string(&self.streams)?;
        self.slot.write(&self.key, &json)
    }
}

/// Read and check the persisted collection; `None` means "use defaults"
fn load_streams<S: KvSlot>(slot: &S, key: &str) -> Option<Vec<StreamRecord>> {
    let raw = match slot.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, "Failed to read stream slot, using defaults: {}", e);
            return None;
        }
    };

    let streams: Vec<StreamRecord> = match serde_json::from_str(&raw) {
        Ok(streams) => streams,
        Err(e) => {
            warn!(key, "Stored streams are not valid, using defaults: {}", e);
            return None;
        }
    };

    let mut seen = HashSet::new();
    if streams.iter().any(|s| s.id == 0 || !seen.insert(s.id)) {
        warn!(key, "Stored streams have invalid ids, using defaults");
        return None;
    }

    Some(streams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::store::slot::MemorySlot;

    fn open_seeded() -> StreamStore<MemorySlot> {
        StreamStore::open(MemorySlot::new())
    }

    #[test]
    fn test_seeds_defaults_without_writing() {
        let store = open_seeded();

        assert_eq!(store.len(), 4);
        assert!(store.slot().get(STORAGE_KEY).is_none());
        assert_eq!(store.current_filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let mut store = open_seeded();
        let record = store
            .insert(NewStream::new("X", "hockey", "https://youtu.be/abc12345678"))
            .unwrap();

        assert_eq!(record.id, 5);
        assert!(record.is_live);
        assert_eq!(store.get_by_id(5), Some(&record));
    }

    #[test]
    fn test_insert_into_empty_store_starts_at_one() {
        let mut store = StreamStore::open(MemorySlot::with_value(STORAGE_KEY, "[]"));
        assert!(store.is_empty());

        let record = store.insert(NewStream::new("A", "tennis", "u")).unwrap();
        assert_eq!(record.id, 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = open_seeded();
        let fifth = store.insert(NewStream::new("A", "tennis", "u")).unwrap();
        store.delete(fifth.id).unwrap();

        let sixth = store.insert(NewStream::new("B", "tennis", "u")).unwrap();
        assert_eq!(sixth.id, 6);
    }

    #[test]
    fn test_update_unknown_id_does_not_write() {
        let mut store = open_seeded();
        let result = store
            .update(42, StreamPatch { title: Some("x".into()), ..Default::default() })
            .unwrap();

        assert!(result.is_none());
        assert!(store.slot().get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_update_merges_and_persists() {
        let mut store = open_seeded();
        let updated = store
            .update(
                2,
                StreamPatch {
                    category: Some(Category::new("hockey")),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.category.as_str(), "hockey");
        assert_eq!(updated.title, "NBA Top 10 Plays of the Week");

        let stored = store.slot().get(STORAGE_KEY).unwrap();
        assert!(stored.contains("\"hockey\""));
    }

    #[test]
    fn test_add_viewers() {
        let mut store = open_seeded();

        assert_eq!(store.add_viewers(1, 8).unwrap(), Some(8));
        assert_eq!(store.get_by_id(1).unwrap().viewers, 45_900);
        assert_eq!(store.add_viewers(99, 8).unwrap(), None);
    }

    #[test]
    fn test_duplicate_ids_fall_back_to_defaults() {
        let json = r#"[
            {"id":1,"title":"a","category":"tennis","url":"u","thumbnail":"","viewers":0,"isLive":true},
            {"id":1,"title":"b","category":"tennis","url":"u","thumbnail":"","viewers":0,"isLive":true}
        ]"#;
        let store = StreamStore::open(MemorySlot::with_value(STORAGE_KEY, json));

        assert_eq!(store.all(), default_streams().as_slice());
    }

    #[test]
    fn test_custom_key() {
        let mut store = StreamStore::open_with_key(MemorySlot::new(), "otherStreams");
        store.delete(1).unwrap();

        assert_eq!(store.key(), "otherStreams");
        assert!(store.slot().get("otherStreams").is_some());
        assert!(store.slot().get(STORAGE_KEY).is_none());
    }
}
