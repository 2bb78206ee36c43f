//! Runtime configuration read from environment variables.

use std::time::Duration;

use crate::input::handler::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::{MAX_ENTITIES, TARGET_FPS};

/// Which audio sink the binary builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioMode {
    /// Terminal bell; the only sound a plain terminal can make.
    #[default]
    Bell,
    Off,
    /// Real sine tones through the sound device (`tone` feature).
    Tone,
}

impl AudioMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "0" | "false" => AudioMode::Off,
            "tone" => AudioMode::Tone,
            _ => AudioMode::Bell,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub fps: u32,
    pub max_entities: usize,
    pub key_release_timeout: Duration,
    pub audio: AudioMode,
    pub log_file: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            max_entities: MAX_ENTITIES,
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            audio: AudioMode::Bell,
            log_file: None,
        }
    }
}

impl EngineConfig {
    /// Create from `ARROW_*` environment variables; unset or malformed values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let fps = lookup("ARROW_FPS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|fps| *fps > 0)
            .unwrap_or(defaults.fps);

        let max_entities = lookup("ARROW_MAX_ENTITIES")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map(|n| n.min(MAX_ENTITIES))
            .unwrap_or(defaults.max_entities);

        let key_release_timeout = lookup("ARROW_KEY_RELEASE_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.key_release_timeout);

        let audio = lookup("ARROW_AUDIO")
            .map(|s| AudioMode::parse(&s))
            .unwrap_or(defaults.audio);

        let log_file = lookup("ARROW_LOG_FILE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            fps,
            max_entities,
            key_release_timeout,
            audio,
            log_file,
        }
    }
}
