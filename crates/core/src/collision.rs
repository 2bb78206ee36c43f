//! Axis-aligned overlap test used by the registry's collision phase.
//!
//! The phase itself is a plain O(n²) sweep over active entity pairs; the entity
//! cap keeps n in the tens.

/// Axis-aligned box in cell coordinates. `w`/`h` come from the sprite size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Aabb {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

/// `a.x < b.x+b.w && a.x+a.w > b.x && a.y < b.y+b.h && a.y+a.h > b.y`,
/// evaluated in 64-bit so far off-screen positions cannot overflow.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let (ax, ay, aw, ah) = (a.x as i64, a.y as i64, a.w as i64, a.h as i64);
    let (bx, by, bw, bh) = (b.x as i64, b.y as i64, b.w as i64, b.h as i64);
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}
