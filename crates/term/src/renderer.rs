//! Presenters: push a fully built [`Surface`] to a display.
//!
//! `TerminalPresenter` keeps the previously presented frame and only writes the
//! runs of cells that changed. The whole frame is encoded into one byte buffer
//! and flushed with a single write, so the terminal never shows half a frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::surface::Surface;
use crate::types::{Color, Palette};

/// Display device for finished frames.
pub trait Presenter {
    /// Show `surface` as one atomic frame.
    fn present(&mut self, surface: &Surface) -> Result<()>;

    /// Forget any cached display state; the next frame is drawn in full.
    fn invalidate(&mut self) {}
}

impl<T: Presenter + ?Sized> Presenter for &mut T {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        (**self).present(surface)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}

pub struct TerminalPresenter {
    stdout: io::Stdout,
    last: Option<Surface>,
    buf: Vec<u8>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch the terminal into game mode: raw input, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()?;
        log::debug!("terminal presenter entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        log::debug!("terminal presenter exited");
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) if prev.width() == surface.width() && prev.height() == surface.height() => {
                encode_diff_into(prev, surface, &mut self.buf)?;
                prev.copy_from(surface);
            }
            _ => {
                encode_full_into(surface, &mut self.buf)?;
                self.last = Some(surface.clone());
            }
        }
        self.flush_buf()
    }

    /// Useful on terminal resize events.
    fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Presenter without a display. Keeps the last frame for inspection.
#[derive(Debug, Clone)]
pub struct HeadlessPresenter {
    frames: u64,
    last: Surface,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            last: Surface::new(0, 0),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> &Surface {
        &self.last
    }
}

impl Default for HeadlessPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        self.last.copy_from(surface);
        self.frames += 1;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<Palette> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let cell = surface.get(x as i32, y as i32).unwrap_or_default();
            apply_color_into(out, &mut current, cell.color)?;
            out.queue(Print(cell.ch))?;
        }
        if y + 1 < surface.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Palette> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get((x + dx) as i32, y as i32).unwrap_or_default();
            apply_color_into(out, &mut current, cell.color)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn apply_color_into(out: &mut Vec<u8>, current: &mut Option<Palette>, color: Color) -> Result<()> {
    let palette = color.to_palette();
    if *current != Some(palette) {
        out.queue(SetForegroundColor(palette_to_color(palette)))?;
        *current = Some(palette);
    }
    Ok(())
}

fn palette_to_color(palette: Palette) -> TermColor {
    match palette {
        Palette::Black => TermColor::Black,
        Palette::Red => TermColor::Red,
        Palette::Green => TermColor::Green,
        Palette::Yellow => TermColor::Yellow,
        Palette::Blue => TermColor::Blue,
        Palette::Magenta => TermColor::Magenta,
        Palette::Cyan => TermColor::Cyan,
        Palette::White => TermColor::White,
    }
}

fn for_each_changed_run(
    prev: &Surface,
    next: &Surface,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if same_cell(prev, next, x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && !same_cell(prev, next, x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

#[inline(always)]
fn same_cell(prev: &Surface, next: &Surface, x: u16, y: u16) -> bool {
    prev.get(x as i32, y as i32) == next.get(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_maps_to_terminal_colors() {
        assert_eq!(palette_to_color(Color::GREEN.to_palette()), TermColor::Green);
        assert_eq!(palette_to_color(Color::GREY.to_palette()), TermColor::White);
        assert_eq!(palette_to_color(Color::BLACK.to_palette()), TermColor::Black);
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = Surface::new(5, 1);
        let mut b = Surface::new(5, 1);

        for x in 1..=3 {
            b.set_cell(x, 0, 'X', Color::WHITE);
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn color_only_changes_are_dirty() {
        let mut a = Surface::new(3, 2);
        let mut b = Surface::new(3, 2);
        a.set_cell(2, 1, '*', Color::RED);
        b.set_cell(2, 1, '*', Color::BLUE);

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(2, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = Surface::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();

        let mut reset_only = Vec::new();
        reset_only.queue(ResetColor).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let mut s = Surface::new(3, 2);
        s.draw_text("abc", 0, 0, Color::WHITE);
        s.draw_text("xyz", 0, 1, Color::RED);

        let mut out = Vec::new();
        encode_full_into(&s, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc"));
        assert!(text.contains("xyz"));
    }

    #[test]
    fn headless_presenter_keeps_last_frame() {
        let mut p = HeadlessPresenter::new();
        let mut s = Surface::new(2, 1);
        s.set_cell(0, 0, 'A', Color::WHITE);
        p.present(&s).unwrap();
        s.set_cell(0, 0, 'B', Color::WHITE);
        p.present(&s).unwrap();

        assert_eq!(p.frames(), 2);
        assert_eq!(p.last_frame().get(0, 0).unwrap().ch, 'B');
    }
}
