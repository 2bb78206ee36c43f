//! Engine: the frame scheduler and everything it needs from the host.
//!
//! [`Engine`] owns the [`Context`](crate::core::Context), the scene manager,
//! an input source, a presenter and a clock, and runs the fixed-timestep loop.
//! Configuration comes from `ARROW_*` environment variables ([`EngineConfig`]).

pub mod audio;
pub mod config;
pub mod pacing;
pub mod scheduler;

pub use arrow_kernel_core as core;
pub use arrow_kernel_input as input;
pub use arrow_kernel_term as term;
pub use arrow_kernel_types as types;

#[cfg(feature = "tone")]
pub use audio::ToneAudio;
pub use audio::{audio_for, BellAudio};
pub use config::{AudioMode, EngineConfig};
pub use pacing::{Clock, FramePacer, ManualClock, SystemClock};
pub use scheduler::{Engine, PAUSE_KEY};
