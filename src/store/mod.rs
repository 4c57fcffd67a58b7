//! Stream catalog storage.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.sportcast/
//! └── sportStreams.json    # JSON array of stream records
//! ```
//!
//! Each record is stored as
//! `{id, title, category, url, thumbnail, viewers, isLive}`.
//! There is no schema version; an unreadable value is replaced by the
//! built-in catalog.

pub mod filter;
pub mod format;
pub mod slot;
pub mod stream_store;

pub use filter::CategoryFilter;
pub use format::{category_label, format_viewers};
pub use slot::{FileSlot, KvSlot, MemorySlot, SlotError};
pub use stream_store::{StreamStore, STORAGE_KEY, VIEWER_DELTA_MAX, VIEWER_DELTA_MIN};
