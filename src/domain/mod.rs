//! Domain types for the stream catalog.
//!
//! This module contains the core data structures:
//! - Category: Sport category keys and labels
//! - Stream: Catalog records and their create/update payloads
//! - Event: Read-only upcoming match listings

pub mod category;
pub mod event;
pub mod stream;

// Re-export commonly used types
pub use category::{Category, CATEGORY_LABELS};
pub use event::{default_events, EventRecord, Team};
pub use stream::{default_streams, NewStream, StreamPatch, StreamRecord, DEFAULT_THUMBNAIL};
