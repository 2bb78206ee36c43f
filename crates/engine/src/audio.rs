//! Audio sinks for the binary.
//!
//! A terminal can only ring its bell, so [`BellAudio`] ignores frequency and
//! duration. Real tones need the `tone` feature, which plays sine waves
//! through the default sound device.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::config::AudioMode;
use crate::core::{Audio, NullAudio};

/// Minimum gap between two bells; a burst of hits rings once.
pub const BELL_MIN_INTERVAL_MS: u64 = 120;

/// Rings the terminal bell (BEL) for every tone, rate limited.
pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
    min_interval: Duration,
    last: Option<Instant>,
}

impl BellAudio {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for BellAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BellAudio<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            min_interval: Duration::from_millis(BELL_MIN_INTERVAL_MS),
            last: None,
        }
    }

    fn ring(&mut self, now: Instant) {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.min_interval {
                return;
            }
        }
        self.last = Some(now);
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::debug!("bell failed: {}", err);
        }
    }
}

impl<W: Write> Audio for BellAudio<W> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        log::trace!("tone {} Hz for {} ms", frequency_hz, duration_ms);
        self.ring(Instant::now());
    }
}

#[cfg(feature = "tone")]
pub use tone::ToneAudio;

#[cfg(feature = "tone")]
mod tone {
    use std::time::Duration;

    use anyhow::Result;
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle};

    use crate::core::Audio;

    /// Sine tones through the default output device.
    pub struct ToneAudio {
        // Dropping the stream stops playback.
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl ToneAudio {
        pub fn new() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl Audio for ToneAudio {
        fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
            let source = SineWave::new(frequency_hz as f32)
                .take_duration(Duration::from_millis(duration_ms as u64))
                .amplify(0.2);
            if let Err(err) = self.handle.play_raw(source) {
                log::debug!("tone playback failed: {}", err);
            }
        }
    }
}

/// Build the sink selected by `mode`, falling back to the bell when the
/// sound device is unavailable.
pub fn audio_for(mode: AudioMode) -> Box<dyn Audio> {
    match mode {
        AudioMode::Off => Box::new(NullAudio),
        AudioMode::Bell => Box::new(BellAudio::new()),
        AudioMode::Tone => tone_or_bell(),
    }
}

#[cfg(feature = "tone")]
fn tone_or_bell() -> Box<dyn Audio> {
    match ToneAudio::new() {
        Ok(tone) => Box::new(tone),
        Err(err) => {
            log::warn!("no sound device ({}), using the terminal bell", err);
            Box::new(BellAudio::new())
        }
    }
}

#[cfg(not(feature = "tone"))]
fn tone_or_bell() -> Box<dyn Audio> {
    log::warn!("built without the `tone` feature, using the terminal bell");
    Box::new(BellAudio::new())
}
