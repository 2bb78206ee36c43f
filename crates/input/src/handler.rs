//! Held-key tracking for terminal environments.
//!
//! Terminals report key presses but usually not key releases. A key counts as
//! held from its press until a release event arrives or, when the terminal has
//! never sent a release event, until no press/repeat has been seen for the
//! release timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{InputSnapshot, Key, MouseButton, Vector2};

/// Maximum number of simultaneously held keys that are tracked.
pub const MAX_HELD_KEYS: usize = 16;

// A single tap must not turn into a sustained "held" state on terminals
// that never emit release events.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: Key,
    last_seen: Instant,
}

/// Accumulates input events between frames and produces one snapshot per frame.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    snapshot: InputSnapshot,
    key_release_timeout: Duration,
    release_events: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::with_key_release_timeout(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS))
    }

    pub fn with_key_release_timeout(key_release_timeout: Duration) -> Self {
        Self {
            held: ArrayVec::new(),
            snapshot: InputSnapshot::new(),
            key_release_timeout,
            release_events: false,
        }
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    /// Has the terminal ever reported a key release?
    pub fn has_release_events(&self) -> bool {
        self.release_events
    }

    /// Start collecting events for a new frame.
    pub fn begin_frame(&mut self) {
        self.snapshot.clear_edges();
    }

    pub fn handle_key_press(&mut self, key: Key, now: Instant) {
        if let Some(h) = self.held.iter_mut().find(|h| h.key == key) {
            h.last_seen = now;
            return;
        }
        if self.held.try_push(HeldKey { key, last_seen: now }).is_err() {
            log::trace!("ignoring {:?}: {} keys already held", key, MAX_HELD_KEYS);
            return;
        }
        self.snapshot.set_down(key, true);
    }

    /// Auto-repeat keeps a held key alive without producing a new press edge.
    pub fn handle_key_repeat(&mut self, key: Key, now: Instant) {
        match self.held.iter_mut().find(|h| h.key == key) {
            Some(h) => h.last_seen = now,
            None => self.handle_key_press(key, now),
        }
    }

    pub fn handle_key_release(&mut self, key: Key) {
        self.release_events = true;
        self.held.retain(|h| h.key != key);
        self.snapshot.set_up(key);
    }

    pub fn handle_pointer(&mut self, x: i32, y: i32) {
        self.snapshot.pointer = Vector2::new(x, y);
    }

    pub fn handle_button(&mut self, button: MouseButton, down: bool) {
        self.snapshot.set_button(button, down);
    }

    pub fn request_quit(&mut self) {
        self.snapshot.quit = true;
    }

    pub fn mark_resized(&mut self) {
        self.snapshot.resized = true;
    }

    /// Apply release timeouts and return this frame's snapshot.
    pub fn finish_frame(&mut self, now: Instant) -> InputSnapshot {
        if !self.release_events {
            let timeout = self.key_release_timeout;
            let snapshot = &mut self.snapshot;
            self.held.retain(|h| {
                let alive = now.saturating_duration_since(h.last_seen) <= timeout;
                if !alive {
                    snapshot.set_up(h.key);
                }
                alive
            });
        }
        self.snapshot
    }

    pub fn reset(&mut self) {
        self.held.clear();
        self.snapshot = InputSnapshot::new();
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
