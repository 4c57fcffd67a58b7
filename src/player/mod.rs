//! Player session: which stream is selected and whether it loaded.
//!
//! Playing a stream resolves its URL, bumps its viewer count and moves the
//! session to `Loading`. The player surface then reports a load signal.
//! A failed stream can be retried, which simply plays it again.

pub mod probe;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::resolver::{resolve, EmbedRef};
use crate::store::{KvSlot, SlotError, StreamStore};

pub use probe::{HttpProbe, PlayerSurface};

/// Errors from player actions
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Stream not found: {0}")]
    NotFound(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] SlotError),
}

/// Load outcome reported by a player surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSignal {
    Loaded,
    Error,
}

/// Player state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing selected yet
    #[default]
    Idle,

    /// Reference handed to the surface, waiting for its signal
    Loading { stream_id: u64, embed: EmbedRef },

    /// Surface reported a successful load
    Playing { stream_id: u64, embed: EmbedRef },

    /// No reference could be derived, or the surface reported an error
    Failed { stream_id: u64 },
}

impl PlayerState {
    /// Stream the state refers to
    pub fn stream_id(&self) -> Option<u64> {
        match self {
            PlayerState::Idle => None,
            PlayerState::Loading { stream_id, .. }
            | PlayerState::Playing { stream_id, .. }
            | PlayerState::Failed { stream_id } => Some(*stream_id),
        }
    }

    /// Reference currently assigned to the surface
    pub fn embed(&self) -> Option<&EmbedRef> {
        match self {
            PlayerState::Loading { embed, .. } | PlayerState::Playing { embed, .. } => Some(embed),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PlayerState::Failed { .. })
    }
}

/// Current stream selection and its load state
#[derive(Debug, Clone, Default)]
pub struct PlayerSession {
    state: PlayerState,

    /// Last stream selected, kept across failures for retry
    current: Option<u64>,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Id of the last selected stream
    pub fn current_stream(&self) -> Option<u64> {
        self.current
    }

    /// Select a stream and hand its reference to the surface.
    ///
    /// An empty source URL puts the session in `Failed` without touching the
    /// viewer count.
    pub fn play<S: KvSlot>(
        &mut self,
        store: &mut StreamStore<S>,
        id: u64,
    ) -> Result<&PlayerState, PlayerError> {
        let record = store.get_by_id(id).ok_or(PlayerError::NotFound(id))?;
        self.current = Some(id);

        let Some(embed) = resolve(&record.url) else {
            warn!(id, "Stream has no playable URL");
            self.state = PlayerState::Failed { stream_id: id };
            return Ok(&self.state);
        };

        info!(id, source = %record.url, embed = %embed.url, "Playing stream");
        store.increment_viewer(id)?;

        self.state = PlayerState::Loading {
            stream_id: id,
            embed,
        };
        Ok(&self.state)
    }

    /// Play the first stream of the current listing, if there is one
    pub fn play_first<S: KvSlot>(
        &mut self,
        store: &mut StreamStore<S>,
    ) -> Result<Option<&PlayerState>, PlayerError> {
        let Some(id) = store.list_current().first().map(|s| s.id) else {
            return Ok(None);
        };
        self.play(store, id).map(Some)
    }

    /// Apply a load signal from the surface
    pub fn on_signal(&mut self, signal: PlayerSignal) -> &PlayerState {
        let next = match (&self.state, signal) {
            (PlayerState::Loading { stream_id, embed }, PlayerSignal::Loaded) => {
                Some(PlayerState::Playing {
                    stream_id: *stream_id,
                    embed: embed.clone(),
                })
            }
            (
                PlayerState::Loading { stream_id, .. } | PlayerState::Playing { stream_id, .. },
                PlayerSignal::Error,
            ) => {
                warn!(id = *stream_id, "Stream failed to load");
                Some(PlayerState::Failed {
                    stream_id: *stream_id,
                })
            }
            _ => None,
        };

        if let Some(next) = next {
            self.state = next;
        }
        &self.state
    }

    /// Play the current stream again; `None` if nothing was ever selected
    pub fn retry<S: KvSlot>(
        &mut self,
        store: &mut StreamStore<S>,
    ) -> Result<Option<&PlayerState>, PlayerError> {
        let Some(id) = self.current else {
            return Ok(None);
        };
        info!(id, "Retrying stream");
        self.play(store, id).map(Some)
    }

    /// Play a stream and wait for the surface's verdict
    pub async fn play_on<S: KvSlot, P: PlayerSurface + ?Sized>(
        &mut self,
        store: &mut StreamStore<S>,
        surface: &P,
        id: u64,
    ) -> Result<&PlayerState, PlayerError> {
        self.play(store, id)?;
        Ok(self.load_on(surface).await)
    }

    /// Hand a loading reference to the surface and apply its verdict.
    ///
    /// Any state other than `Loading` is returned unchanged.
    pub async fn load_on<P: PlayerSurface + ?Sized>(&mut self, surface: &P) -> &PlayerState {
        let embed_url = match &self.state {
            PlayerState::Loading { embed, .. } => embed.url.clone(),
            _ => return &self.state,
        };

        debug!(surface = surface.name(), url = %embed_url, "Loading on surface");
        let signal = surface.load(&embed_url).await;
        self.on_signal(signal)
    }
}
