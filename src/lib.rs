//! sportcast - Live sport stream catalog and player shell
//!
//! Keeps a small catalog of stream records, lists them by category, and
//! turns share-style video links into embeddable player references.
//!
//! # Modules
//!
//! - `domain`: Data structures (StreamRecord, EventRecord, Category)
//! - `store`: Catalog store, key-value slots, filter, formatting
//! - `resolver`: Share URL to embed URL resolution and strict validation
//! - `admin`: Validated add/edit/delete write path
//! - `player`: Player session state and player surfaces
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List football streams
//! sportcast list --category football
//!
//! # Play a stream and check that it loads
//! sportcast play 1 --probe
//!
//! # Add a stream
//! sportcast add --title "Derby" --category football --url https://youtu.be/dQw4w9WgXcQ
//! ```

pub mod admin;
pub mod cli;
pub mod config;
pub mod domain;
pub mod player;
pub mod resolver;
pub mod store;

// Re-export main types at crate root for convenience
pub use admin::{AdminError, AdminSession, StreamForm};
pub use domain::{Category, EventRecord, NewStream, StreamPatch, StreamRecord, Team};
pub use player::{PlayerError, PlayerSession, PlayerSignal, PlayerState};
pub use resolver::{resolve, validate_share_url, EmbedKind, EmbedRef, UrlValidationError};
pub use store::{
    category_label, format_viewers, CategoryFilter, FileSlot, KvSlot, MemorySlot, SlotError,
    StreamStore,
};
