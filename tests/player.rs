//! Player Session Integration Tests
//!
//! Tests for play/retry flow against scripted player surfaces.

use std::sync::Mutex;

use async_trait::async_trait;
use sportcast::player::PlayerSurface;
use sportcast::{MemorySlot, PlayerSession, PlayerSignal, PlayerState, StreamStore};

/// Surface that replays a fixed list of signals and records what it loaded
struct ScriptedSurface {
    signals: Mutex<Vec<PlayerSignal>>,
    loaded: Mutex<Vec<String>>,
}

impl ScriptedSurface {
    fn new(mut signals: Vec<PlayerSignal>) -> Self {
        signals.reverse();
        Self {
            signals: Mutex::new(signals),
            loaded: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PlayerSurface for ScriptedSurface {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn load(&self, embed_url: &str) -> PlayerSignal {
        self.loaded.lock().unwrap().push(embed_url.to_string());
        self.signals.lock().unwrap().pop().unwrap_or(PlayerSignal::Error)
    }
}

#[tokio::test]
async fn test_play_on_loaded_surface() {
    let mut store = StreamStore::open(MemorySlot::new());
    let mut player = PlayerSession::new();
    let surface = ScriptedSurface::new(vec![PlayerSignal::Loaded]);

    let state = player.play_on(&mut store, &surface, 2).await.unwrap();

    assert!(matches!(state, PlayerState::Playing { stream_id: 2, .. }));
    assert_eq!(
        surface.loaded.lock().unwrap().as_slice(),
        ["https://www.youtube.com/embed/xMfA6T3fBkE?autoplay=1&mute=1"]
    );
}

#[tokio::test]
async fn test_retry_after_error_re_resolves() {
    let mut store = StreamStore::open(MemorySlot::new());
    let mut player = PlayerSession::new();
    let surface = ScriptedSurface::new(vec![PlayerSignal::Error, PlayerSignal::Loaded]);
    let before = store.get_by_id(3).unwrap().viewers;

    let state = player.play_on(&mut store, &surface, 3).await.unwrap();
    assert_eq!(state, &PlayerState::Failed { stream_id: 3 });

    let state = player.play_on(&mut store, &surface, 3).await.unwrap();
    assert!(matches!(state, PlayerState::Playing { stream_id: 3, .. }));

    // Each play action bumps the viewer count
    let after = store.get_by_id(3).unwrap().viewers;
    assert!(after >= before + 2 && after <= before + 100);

    let loaded = surface.loaded.lock().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], loaded[1]);
}

#[tokio::test]
async fn test_empty_url_skips_surface() {
    let mut store = StreamStore::open(MemorySlot::new());
    store
        .update(
            1,
            sportcast::StreamPatch {
                url: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let mut player = PlayerSession::new();
    let surface = ScriptedSurface::new(vec![PlayerSignal::Loaded]);

    let state = player.play_on(&mut store, &surface, 1).await.unwrap();

    assert!(state.is_failed());
    assert!(surface.loaded.lock().unwrap().is_empty());
}

#[test]
fn test_pass_through_url_still_loads() {
    let mut store = StreamStore::open(MemorySlot::new());
    store
        .update(
            4,
            sportcast::StreamPatch {
                url: Some("https://www.facebook.com/watch/?v=1".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let mut player = PlayerSession::new();

    let state = player.play(&mut store, 4).unwrap();
    let embed = state.embed().unwrap();
    assert_eq!(embed.url, "https://www.facebook.com/watch/?v=1");
    assert!(!embed.kind.is_embeddable());
}

#[tokio::test]
async fn test_play_first_then_load_on_surface() {
    let mut store = StreamStore::open(MemorySlot::new());
    store.select_filter("tennis".parse().unwrap());
    let mut player = PlayerSession::new();
    let surface = ScriptedSurface::new(vec![PlayerSignal::Loaded]);
    let before = store.get_by_id(3).unwrap().viewers;

    player.play_first(&mut store).unwrap().unwrap();
    let state = player.load_on(&surface).await;

    assert!(matches!(state, PlayerState::Playing { stream_id: 3, .. }));
    assert_eq!(surface.loaded.lock().unwrap().len(), 1);

    // Loading on the surface does not count as a second play
    let after = store.get_by_id(3).unwrap().viewers;
    assert!(after > before && after <= before + 50);
}

#[tokio::test]
async fn test_load_on_ignores_idle_session() {
    let mut player = PlayerSession::new();
    let surface = ScriptedSurface::new(vec![PlayerSignal::Loaded]);

    assert_eq!(player.load_on(&surface).await, &PlayerState::Idle);
    assert!(surface.loaded.lock().unwrap().is_empty());
}
