//! Render surface: an off-screen grid of glyph + color cells.
//!
//! Every drawing call clips: writes outside `[0, width) x [0, height)` are
//! dropped without error, so callers never bounds-check.

use crate::sprite::Sprite;
use crate::types::{Color, BACKGROUND_GLYPH};

/// A single surface cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    pub const fn new(ch: char, color: Color) -> Self {
        Self { ch, color }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: BACKGROUND_GLYPH,
            color: Color::WHITE,
        }
    }
}

/// Fixed-size character grid built once per frame and then presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Reset every cell to the background glyph in the default color.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell { ch, color };
        }
    }

    /// Copy the opaque cells of `sprite` with its origin at `(x, y)`.
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        if !sprite.visible {
            return;
        }
        for (sx, sy, ch) in sprite.opaque_cells() {
            self.set_cell(x.saturating_add(sx), y.saturating_add(sy), ch, sprite.color);
        }
    }

    /// Write `text` left to right starting at `(x, y)`. No wrapping.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width as i32 {
                break;
            }
            self.set_cell(cx, y, ch, color);
            cx = cx.saturating_add(1);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, ch: char, color: Color) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set_cell(x.saturating_add(dx), y.saturating_add(dy), ch, color);
            }
        }
    }

    pub fn draw_hline(&mut self, x: i32, y: i32, len: u16, ch: char, color: Color) {
        self.fill_rect(x, y, len, 1, ch, color);
    }

    pub fn draw_vline(&mut self, x: i32, y: i32, len: u16, ch: char, color: Color) {
        self.fill_rect(x, y, 1, len, ch, color);
    }

    /// Outline the whole surface: `-` on the top and bottom rows, `|` on the sides.
    pub fn draw_border(&mut self, color: Color) {
        let (w, h) = (self.width, self.height);
        self.draw_hline(0, 0, w, '-', color);
        self.draw_hline(0, h as i32 - 1, w, '-', color);
        self.draw_vline(0, 0, h, '|', color);
        self.draw_vline(w as i32 - 1, 0, h, '|', color);
    }

    /// Overwrite this surface with `other`, reusing the allocation.
    pub fn copy_from(&mut self, other: &Surface) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clone_from(&other.cells);
    }

    /// Row `y` as a string; handy in tests and debug logs.
    pub fn row_text(&self, y: u16) -> String {
        let start = (y as usize) * (self.width as usize);
        self.cells
            .get(start..start + self.width as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}
