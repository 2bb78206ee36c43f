//! Logical keys and the per-frame input snapshot.
//!
//! The snapshot is a plain `Copy` value: it is sampled once per frame and every
//! hook in that frame reads the same one.

use crate::Vector2;

/// Logical key code.
///
/// Letters are reported lowercase; `' '` is reported as [`Key::Space`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Esc,
    Backspace,
    Tab,
    Char(char),
}

impl Key {
    /// Build a character key, normalizing case and space.
    pub fn from_char(ch: char) -> Self {
        match ch {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '\t' => Key::Tab,
            c => Key::Char(c.to_ascii_lowercase()),
        }
    }

    /// Slot in the 256-entry key table, or `None` for keys the table can't hold.
    fn slot(self) -> Option<u8> {
        match self {
            Key::Up => Some(128),
            Key::Down => Some(129),
            Key::Left => Some(130),
            Key::Right => Some(131),
            Key::Space => Some(b' '),
            Key::Enter => Some(13),
            Key::Esc => Some(27),
            Key::Backspace => Some(8),
            Key::Tab => Some(9),
            Key::Char(c) if c.is_ascii() => Some(c.to_ascii_lowercase() as u8),
            Key::Char(_) => None,
        }
    }
}

/// Pointer buttons tracked by the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct KeySet([u64; 4]);

impl KeySet {
    fn contains(&self, slot: u8) -> bool {
        self.0[(slot / 64) as usize] & (1u64 << (slot % 64)) != 0
    }

    fn insert(&mut self, slot: u8) {
        self.0[(slot / 64) as usize] |= 1u64 << (slot % 64);
    }

    fn remove(&mut self, slot: u8) {
        self.0[(slot / 64) as usize] &= !(1u64 << (slot % 64));
    }

    fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }
}

/// Immutable view of the input devices for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    held: KeySet,
    pressed: KeySet,
    pub pointer: Vector2,
    pub buttons: [bool; 3],
    /// The user asked to quit this frame (e.g. Ctrl-C in raw mode).
    pub quit: bool,
    /// The display was resized this frame.
    pub resized: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `key` currently held down?
    pub fn is_down(&self, key: Key) -> bool {
        key.slot().is_some_and(|s| self.held.contains(s))
    }

    /// Did `key` go down during this frame?
    ///
    /// Useful for toggles and menu selections that must fire once per press.
    pub fn just_pressed(&self, key: Key) -> bool {
        key.slot().is_some_and(|s| self.pressed.contains(s))
    }

    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn any_down(&self) -> bool {
        !self.held.is_empty()
    }

    /// Mark `key` as held. `newly` also records a press edge for this frame.
    pub fn set_down(&mut self, key: Key, newly: bool) {
        if let Some(s) = key.slot() {
            self.held.insert(s);
            if newly {
                self.pressed.insert(s);
            }
        }
    }

    pub fn set_up(&mut self, key: Key) {
        if let Some(s) = key.slot() {
            self.held.remove(s);
        }
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons[button.index()] = down;
    }

    /// Builder used by tests and scripted input: `key` held and pressed this frame.
    pub fn with_pressed(mut self, key: Key) -> Self {
        self.set_down(key, true);
        self
    }

    /// Builder used by tests and scripted input: `key` held since an earlier frame.
    pub fn with_held(mut self, key: Key) -> Self {
        self.set_down(key, false);
        self
    }

    /// Drop the press edges, keeping held keys (start of a new frame).
    pub fn clear_edges(&mut self) {
        self.pressed = KeySet::default();
        self.quit = false;
        self.resized = false;
    }
}
