//! Sprites: small owned character grids built from art lines.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::types::{Color, TRANSPARENT_GLYPH};

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite storage for {cells} cells could not be allocated")]
    Allocation {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Character art with a display color and a visibility flag.
///
/// Cells equal to [`TRANSPARENT_GLYPH`] are not drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u16,
    height: u16,
    data: Vec<char>,
    pub color: Color,
    pub visible: bool,
}

impl Sprite {
    /// Build a sprite from art lines.
    ///
    /// The width is the longest line; shorter lines are padded with transparent cells.
    pub fn from_art(art: &[&str], color: Color) -> Result<Self, SpriteError> {
        let height = art.len().min(u16::MAX as usize);
        let width = art
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize);

        let cells = width * height;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|source| SpriteError::Allocation { cells, source })?;

        for line in art.iter().take(height) {
            let before = data.len();
            data.extend(line.chars().take(width));
            data.resize(before + width, TRANSPARENT_GLYPH);
        }

        Ok(Self {
            width: width as u16,
            height: height as u16,
            data,
            color,
            visible: true,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    /// Non-transparent cells as `(x, y, glyph)` offsets from the sprite origin.
    pub fn opaque_cells(&self) -> impl Iterator<Item = (i32, i32, char)> + '_ {
        let w = self.width.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch != TRANSPARENT_GLYPH)
            .map(move |(i, ch)| ((i % w) as i32, (i / w) as i32, *ch))
    }
}
