//! Single-playback audio registry.
//!
//! Audio previews are rendered by independent widgets (merch cards, post
//! embeds, landing-page blocks). Starting one should stop whatever else is
//! playing. Each player registers itself with the shared [`AudioRegistry`]
//! when it starts and unregisters when it goes away; the registry stops the
//! previous player on takeover.
//!
//! Cooperation is advisory: a player that never unregisters stays recorded
//! until another registration overwrites it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Identity of one audio player instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackId(Uuid);

impl PlaybackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaybackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A controllable audio player.
#[cfg(not(target_arch = "wasm32"))]
pub trait AudioHandle: Send + Sync {
    fn id(&self) -> PlaybackId;

    /// Whether the player is currently producing sound.
    fn is_playing(&self) -> bool;

    /// Pause playback.
    fn stop(&self);
}

/// A controllable audio player (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait AudioHandle {
    fn id(&self) -> PlaybackId;

    /// Whether the player is currently producing sound.
    fn is_playing(&self) -> bool;

    /// Pause playback.
    fn stop(&self);
}

/// Tracks the one player allowed to be active.
#[derive(Default)]
pub struct AudioRegistry {
    active: Mutex<Option<Arc<dyn AudioHandle>>>,
}

impl AudioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<dyn AudioHandle>>> {
        // The slot holds no invariant a panic could break.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `handle` the active player, stopping a different one that is
    /// still playing.
    pub fn register(&self, handle: Arc<dyn AudioHandle>) {
        let id = handle.id();
        let previous = self.slot().replace(handle);

        // Stop outside the lock so a player may unregister from `stop`.
        if let Some(previous) = previous {
            if previous.id() != id && previous.is_playing() {
                log::debug!("Audio {} takes over from {}", id, previous.id());
                previous.stop();
            }
        }
    }

    /// Forget the active player if it is `id`. Returns whether it was.
    ///
    /// A stale unregister from a player that was already replaced is a no-op.
    pub fn unregister(&self, id: PlaybackId) -> bool {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|h| h.id() == id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Identity of the recorded player, if any.
    pub fn active(&self) -> Option<PlaybackId> {
        self.slot().as_ref().map(|h| h.id())
    }

    /// Stop and forget whatever is playing.
    pub fn stop_all(&self) {
        let previous = self.slot().take();
        if let Some(previous) = previous {
            previous.stop();
        }
    }
}

impl fmt::Debug for AudioRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioRegistry")
            .field("active", &self.active())
            .finish()
    }
}
