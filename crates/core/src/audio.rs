//! Audio sink seen by scenes and entity hooks.

use std::cell::RefCell;
use std::rc::Rc;

/// Fire-and-forget tone output. Nothing about playback is reported back.
pub trait Audio {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

/// Silent sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play_tone(&mut self, _frequency_hz: u32, _duration_ms: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

/// Records requested tones. Clones share one log, so a test can keep a clone
/// while the context owns the other.
#[derive(Debug, Clone, Default)]
pub struct ToneLog {
    tones: Rc<RefCell<Vec<Tone>>>,
}

impl ToneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tones(&self) -> Vec<Tone> {
        self.tones.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tones.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Audio for ToneLog {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tones.borrow_mut().push(Tone {
            frequency_hz,
            duration_ms,
        });
    }
}
