//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the kernel.
//! All types are plain data with no external dependencies, making them
//! usable from the entity core, the terminal renderer and the input layer alike.
//!
//! # Screen Dimensions
//!
//! The render surface is a fixed character grid:
//!
//! - **Width**: 80 columns (indexed 0-79)
//! - **Height**: 25 rows (indexed 0-24)
//!
//! # Timing and Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Frame budget is `1/TARGET_FPS` seconds |
//! | `MAX_ENTITIES` | 50 | Hard cap of the entity registry |
//! | `DEFAULT_HEALTH` | 250 | Health of a freshly created entity |
//!
//! # Examples
//!
//! ```
//! use arrow_kernel_types::{Color, Palette, Vector2, SCREEN_HEIGHT, SCREEN_WIDTH};
//!
//! let p = Vector2::new(3, -1) + Vector2::new(1, 2);
//! assert_eq!(p, Vector2::new(4, 1));
//!
//! // Presentation approximates 24-bit colors with an 8-entry palette.
//! assert_eq!(Color::new(0, 255, 0).to_palette(), Palette::Green);
//! assert_eq!(Color::new(255, 255, 0).to_palette(), Palette::Yellow);
//!
//! assert_eq!(SCREEN_WIDTH, 80);
//! assert_eq!(SCREEN_HEIGHT, 25);
//! ```

use std::ops::{Add, AddAssign, Sub};

pub mod input;

pub use input::{InputSnapshot, Key, MouseButton};

/// Surface width in cells (80 columns)
pub const SCREEN_WIDTH: u16 = 80;

/// Surface height in cells (25 rows)
pub const SCREEN_HEIGHT: u16 = 25;

/// Target frame rate; the scheduler's frame budget is `1 / TARGET_FPS` seconds.
pub const TARGET_FPS: u32 = 60;

/// Hard upper bound on live entities in one registry.
pub const MAX_ENTITIES: usize = 50;

/// Health assigned to every newly created entity.
pub const DEFAULT_HEALTH: i32 = 250;

/// Sprite cells holding this glyph are not drawn.
pub const TRANSPARENT_GLYPH: char = ' ';

/// Glyph written by `clear()`.
pub const BACKGROUND_GLYPH: char = ' ';

/// Integer cell coordinate (or velocity in cells per frame).
///
/// Coordinates may be negative or past the surface edge; drawing clips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GREY: Color = Color::new(128, 128, 128);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Map to the nearest 8-color palette entry.
    ///
    /// Each channel is considered lit when it is at least half intensity.
    pub const fn to_palette(self) -> Palette {
        let r = (self.r >= PALETTE_THRESHOLD) as u8;
        let g = (self.g >= PALETTE_THRESHOLD) as u8;
        let b = (self.b >= PALETTE_THRESHOLD) as u8;
        match (r, g, b) {
            (0, 0, 0) => Palette::Black,
            (1, 0, 0) => Palette::Red,
            (0, 1, 0) => Palette::Green,
            (1, 1, 0) => Palette::Yellow,
            (0, 0, 1) => Palette::Blue,
            (1, 0, 1) => Palette::Magenta,
            (0, 1, 1) => Palette::Cyan,
            _ => Palette::White,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

// Inclusive, so mid grey (128) still lights up as white.
const PALETTE_THRESHOLD: u8 = 128;

/// The discrete palette a terminal can show for any [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}
