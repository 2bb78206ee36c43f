//! Terminal rendering layer.
//!
//! Scenes and entities draw into a [`Surface`], an off-screen grid of
//! glyph + color cells. Once a frame is fully built it is handed to a
//! [`Presenter`], which pushes it to the display in one write.
//!
//! Goals:
//! - Keep drawing pure (no I/O) so it can be unit-tested
//! - Clip every write so callers never bounds-check
//! - Only touch the terminal cells that changed since the previous frame

pub mod renderer;
pub mod sprite;
pub mod surface;

pub use arrow_kernel_types as types;

pub use renderer::{encode_diff_into, encode_full_into, HeadlessPresenter, Presenter, TerminalPresenter};
pub use sprite::{Sprite, SpriteError};
pub use surface::{Cell, Surface};
