//! Input sources sampled once per frame by the scheduler.

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, MouseButton as TermButton,
    MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use crate::handler::KeyTracker;
use crate::map::{map_key_code, should_quit};
use crate::types::{InputSnapshot, MouseButton};

/// Produces the immutable input snapshot for one frame.
pub trait InputSource {
    fn poll(&mut self) -> Result<InputSnapshot>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self) -> Result<InputSnapshot> {
        (**self).poll()
    }
}

/// Reads pending crossterm events without blocking.
pub struct TerminalInput {
    tracker: KeyTracker,
    enhanced: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::with_tracker(KeyTracker::new())
    }

    pub fn with_tracker(tracker: KeyTracker) -> Self {
        Self {
            tracker,
            enhanced: false,
        }
    }

    /// Ask the terminal for key release events when it supports them.
    ///
    /// Without them, held keys fall back to the release timeout.
    pub fn enter(&mut self) -> Result<()> {
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            self.enhanced = true;
        }
        log::info!("terminal input ready (release events: {})", self.enhanced);
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.enhanced = false;
        }
        Ok(())
    }

    fn apply(&mut self, ev: Event, now: Instant) {
        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    self.tracker.request_quit();
                    return;
                }
                let Some(k) = map_key_code(key.code) else {
                    return;
                };
                match key.kind {
                    KeyEventKind::Press => self.tracker.handle_key_press(k, now),
                    KeyEventKind::Repeat => self.tracker.handle_key_repeat(k, now),
                    KeyEventKind::Release => self.tracker.handle_key_release(k),
                }
            }
            Event::Mouse(m) => {
                self.tracker.handle_pointer(m.column as i32, m.row as i32);
                match m.kind {
                    MouseEventKind::Down(b) => self.tracker.handle_button(map_button(b), true),
                    MouseEventKind::Up(b) => self.tracker.handle_button(map_button(b), false),
                    _ => {}
                }
            }
            Event::Resize(w, h) => {
                log::debug!("terminal resized to {}x{}", w, h);
                self.tracker.mark_resized();
            }
            _ => {}
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<InputSnapshot> {
        self.tracker.begin_frame();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.apply(ev, Instant::now());
        }
        Ok(self.tracker.finish_frame(Instant::now()))
    }
}

fn map_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

/// Replays prepared snapshots, one per frame. Once drained it keeps
/// returning an empty snapshot.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, snapshot: InputSnapshot) {
        self.frames.push_back(snapshot);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<InputSnapshot> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
