//! Terminal input module (engine-facing).
//!
//! This module is independent of any scene. It maps `crossterm` events into
//! logical [`Key`](crate::types::Key)s, tracks which keys are held (including
//! terminals without key-release events) and hands the scheduler one immutable
//! [`InputSnapshot`](crate::types::InputSnapshot) per frame.

pub mod handler;
pub mod map;
pub mod source;

pub use arrow_kernel_types as types;

pub use handler::KeyTracker;
pub use map::{map_key_code, should_quit};
pub use source::{InputSource, ScriptedInput, TerminalInput};
