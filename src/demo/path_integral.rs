//! Path integral visualizer: walk a cursor over a scalar field and sum the
//! field along the cells you pick.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::core::{Context, Scene, SceneAction};
use crate::types::{Color, Key, Vector2};

use super::menu::MenuScene;
use super::shooter::ShooterKind;

pub const FIELD_WIDTH: usize = 60;
pub const FIELD_HEIGHT: usize = 20;
pub const FIELD_OFFSET_X: i32 = 10;
pub const FIELD_OFFSET_Y: i32 = 3;
pub const MAX_PATH_LEN: usize = 200;
pub const MOVE_COOLDOWN_FRAMES: u8 = 5;

/// Field value at grid cell `(x, y)`: a central Gaussian bump plus two waves.
pub fn field_value(x: usize, y: usize) -> f32 {
    let nx = x as f32 / FIELD_WIDTH as f32 - 0.5;
    let ny = y as f32 / FIELD_HEIGHT as f32 - 0.5;
    let gaussian = (-(nx * nx + ny * ny) * 10.0).exp();
    let wave = (nx * 10.0).sin() * 0.5 + (ny * 15.0).sin() * 0.3;
    gaussian * 2.0 + wave
}

/// Glyph for a field value, by magnitude.
pub fn glyph_for(value: f32) -> char {
    let v = value.abs();
    match v {
        v if v < 0.2 => ' ',
        v if v < 0.4 => '.',
        v if v < 0.6 => '-',
        v if v < 0.8 => '+',
        v if v < 1.0 => '*',
        v if v < 1.5 => '#',
        _ => '@',
    }
}

/// Map a value to red (high), green (middle) and blue (low), clamped to [-1, 1].
pub fn color_for(value: f32) -> Color {
    let v = (value.clamp(-1.0, 1.0) + 1.0) * 0.5;
    Color::new(
        (255.0 * v) as u8,
        (255.0 * (1.0 - (v - 0.5).abs() * 2.0)) as u8,
        (255.0 * (1.0 - v)) as u8,
    )
}

#[derive(Debug, Clone, Copy)]
struct FieldCell {
    value: f32,
    glyph: char,
    color: Color,
}

pub struct PathIntegralScene {
    field: Vec<FieldCell>,
    path: ArrayVec<Vector2, MAX_PATH_LEN>,
    integral: f32,
    show_integral: bool,
    cursor: Vector2,
    move_cooldown: u8,
}

impl PathIntegralScene {
    pub fn new() -> Self {
        Self {
            field: Vec::new(),
            path: ArrayVec::new(),
            integral: 0.0,
            show_integral: true,
            cursor: Self::home(),
            move_cooldown: 0,
        }
    }

    fn home() -> Vector2 {
        Vector2::new(FIELD_WIDTH as i32 / 2, FIELD_HEIGHT as i32 / 2)
    }

    pub fn cursor(&self) -> Vector2 {
        self.cursor
    }

    pub fn path(&self) -> &[Vector2] {
        &self.path
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn shows_integral(&self) -> bool {
        self.show_integral
    }

    fn value_at(&self, p: Vector2) -> Option<f32> {
        if p.x < 0 || p.y < 0 || p.x >= FIELD_WIDTH as i32 || p.y >= FIELD_HEIGHT as i32 {
            return None;
        }
        self.field
            .get(p.y as usize * FIELD_WIDTH + p.x as usize)
            .map(|c| c.value)
    }

    /// Append `p` unless it repeats the last point, is off the field or the path is full.
    pub fn add_point(&mut self, p: Vector2) {
        if self.value_at(p).is_none() || self.path.last() == Some(&p) {
            return;
        }
        if self.path.try_push(p).is_err() {
            log::debug!("path is full ({} points)", MAX_PATH_LEN);
            return;
        }
        self.integral = self.path.iter().filter_map(|&q| self.value_at(q)).sum();
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.integral = 0.0;
    }

    fn move_cursor(&mut self, ctx: &Context<ShooterKind>) {
        if self.move_cooldown > 0 {
            self.move_cooldown -= 1;
            return;
        }
        let input = &ctx.input;
        let c = &mut self.cursor;
        let mut moved = false;
        if input.is_down(Key::Left) && c.x > 0 {
            c.x -= 1;
            moved = true;
        }
        if input.is_down(Key::Right) && c.x < FIELD_WIDTH as i32 - 1 {
            c.x += 1;
            moved = true;
        }
        if input.is_down(Key::Up) && c.y > 0 {
            c.y -= 1;
            moved = true;
        }
        if input.is_down(Key::Down) && c.y < FIELD_HEIGHT as i32 - 1 {
            c.y += 1;
            moved = true;
        }
        if moved {
            self.move_cooldown = MOVE_COOLDOWN_FRAMES;
        }
    }
}

impl Default for PathIntegralScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShooterKind> for PathIntegralScene {
    fn name(&self) -> &str {
        "PathIntegral"
    }

    fn enter(&mut self, _ctx: &mut Context<ShooterKind>) {
        self.field.clear();
        self.field.reserve(FIELD_WIDTH * FIELD_HEIGHT);
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                let value = field_value(x, y);
                self.field.push(FieldCell {
                    value,
                    glyph: glyph_for(value),
                    color: color_for(value),
                });
            }
        }
        self.clear_path();
        self.cursor = Self::home();
        self.move_cooldown = 0;
        self.show_integral = true;
    }

    fn update(&mut self, ctx: &mut Context<ShooterKind>, _dt: Duration) -> SceneAction<ShooterKind> {
        let input = ctx.input;
        if input.just_pressed(Key::Esc) {
            return SceneAction::Switch(Box::new(MenuScene::new()));
        }

        self.move_cursor(ctx);
        if input.just_pressed(Key::Space) {
            self.add_point(self.cursor);
        }
        if input.just_pressed(Key::Char('c')) {
            self.clear_path();
        }
        if input.just_pressed(Key::Char('i')) {
            self.show_integral = !self.show_integral;
        }
        SceneAction::Continue
    }

    fn render(&mut self, ctx: &mut Context<ShooterKind>) {
        let s = &mut ctx.surface;

        for (i, cell) in self.field.iter().enumerate() {
            let x = (i % FIELD_WIDTH) as i32 + FIELD_OFFSET_X;
            let y = (i / FIELD_WIDTH) as i32 + FIELD_OFFSET_Y;
            s.set_cell(x, y, cell.glyph, cell.color);
        }

        for (i, p) in self.path.iter().enumerate() {
            let glyph = if i == 0 { 'X' } else { 'O' };
            s.set_cell(FIELD_OFFSET_X + p.x, FIELD_OFFSET_Y + p.y, glyph, Color::WHITE);
        }

        if self.show_integral {
            let text = format!("Path Integral: {:.3}", self.integral);
            s.draw_text(&text, 2, 1, Color::YELLOW);
        } else {
            s.draw_text("Path Integral: (hidden)", 2, 1, Color::YELLOW);
        }
        s.draw_text("ARROW KEYS: move cursor   ESC: exit to menu", 2, 23, Color::WHITE);
        s.draw_text("SPACE: add point   C: clear   I: toggle integral", 2, 24, Color::WHITE);

        s.set_cell(
            FIELD_OFFSET_X + self.cursor.x,
            FIELD_OFFSET_Y + self.cursor.y,
            '+',
            Color::CYAN,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NullAudio;
    use crate::types::{InputSnapshot, SCREEN_HEIGHT, SCREEN_WIDTH};

    fn entered() -> (PathIntegralScene, Context<ShooterKind>) {
        let mut ctx = Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, Box::new(NullAudio));
        let mut scene = PathIntegralScene::new();
        scene.enter(&mut ctx);
        (scene, ctx)
    }

    fn press(scene: &mut PathIntegralScene, ctx: &mut Context<ShooterKind>, input: InputSnapshot) -> bool {
        ctx.input = input;
        matches!(scene.update(ctx, Duration::ZERO), SceneAction::Switch(_))
    }

    #[test]
    fn field_peaks_in_the_middle() {
        assert!((field_value(30, 10) - 2.0).abs() < 1e-6);
        assert_eq!(glyph_for(field_value(30, 10)), '@');
        assert!(field_value(0, 0).abs() < field_value(30, 10));
    }

    #[test]
    fn glyph_ramp_uses_magnitude() {
        assert_eq!(glyph_for(0.0), ' ');
        assert_eq!(glyph_for(-0.3), '.');
        assert_eq!(glyph_for(0.5), '-');
        assert_eq!(glyph_for(0.7), '+');
        assert_eq!(glyph_for(-0.9), '*');
        assert_eq!(glyph_for(1.2), '#');
        assert_eq!(glyph_for(1.5), '@');
    }

    #[test]
    fn color_map_runs_blue_to_red() {
        assert_eq!(color_for(-5.0), Color::new(0, 0, 255));
        assert_eq!(color_for(5.0), Color::new(255, 0, 0));
        assert_eq!(color_for(0.0).g, 255);
    }

    #[test]
    fn points_accumulate_and_duplicates_are_skipped() {
        let (mut scene, mut ctx) = entered();
        let space = InputSnapshot::new().with_pressed(Key::Space);

        press(&mut scene, &mut ctx, space);
        press(&mut scene, &mut ctx, space);
        assert_eq!(scene.path(), &[Vector2::new(30, 10)]);
        assert!((scene.integral() - 2.0).abs() < 1e-6);

        scene.add_point(Vector2::new(0, 0));
        let expected = field_value(30, 10) + field_value(0, 0);
        assert!((scene.integral() - expected).abs() < 1e-5);

        scene.add_point(Vector2::new(-1, 0));
        scene.add_point(Vector2::new(0, FIELD_HEIGHT as i32));
        assert_eq!(scene.path().len(), 2);
    }

    #[test]
    fn path_is_capped() {
        let (mut scene, _ctx) = entered();
        for i in 0..(MAX_PATH_LEN + 20) {
            scene.add_point(Vector2::new((i % FIELD_WIDTH) as i32, (i / FIELD_WIDTH) as i32));
        }
        assert_eq!(scene.path().len(), MAX_PATH_LEN);
    }

    #[test]
    fn clear_and_toggle() {
        let (mut scene, mut ctx) = entered();
        scene.add_point(Vector2::new(1, 1));

        press(&mut scene, &mut ctx, InputSnapshot::new().with_pressed(Key::from_char('C')));
        assert!(scene.path().is_empty());
        assert_eq!(scene.integral(), 0.0);

        press(&mut scene, &mut ctx, InputSnapshot::new().with_pressed(Key::Char('i')));
        assert!(!scene.shows_integral());
        scene.render(&mut ctx);
        assert!(ctx.surface.row_text(1).contains("(hidden)"));
    }

    #[test]
    fn cursor_moves_with_cooldown_and_stays_on_field() {
        let (mut scene, mut ctx) = entered();
        let left = InputSnapshot::new().with_held(Key::Left);

        press(&mut scene, &mut ctx, left);
        assert_eq!(scene.cursor(), Vector2::new(29, 10));
        for _ in 0..MOVE_COOLDOWN_FRAMES {
            press(&mut scene, &mut ctx, left);
        }
        assert_eq!(scene.cursor(), Vector2::new(29, 10));
        press(&mut scene, &mut ctx, left);
        assert_eq!(scene.cursor(), Vector2::new(28, 10));

        for _ in 0..1000 {
            press(&mut scene, &mut ctx, left);
        }
        assert_eq!(scene.cursor().x, 0);
    }

    #[test]
    fn render_draws_field_path_and_cursor() {
        let (mut scene, mut ctx) = entered();
        scene.add_point(Vector2::new(0, 0));
        scene.add_point(Vector2::new(1, 0));
        scene.render(&mut ctx);

        let s = &ctx.surface;
        assert_eq!(s.get(FIELD_OFFSET_X, FIELD_OFFSET_Y).unwrap().ch, 'X');
        assert_eq!(s.get(FIELD_OFFSET_X + 1, FIELD_OFFSET_Y).unwrap().ch, 'O');
        let cursor = s.get(FIELD_OFFSET_X + 30, FIELD_OFFSET_Y + 10).unwrap();
        assert_eq!((cursor.ch, cursor.color), ('+', Color::CYAN));
        assert!(s.row_text(1).contains("Path Integral: "));
    }

    #[test]
    fn esc_returns_to_menu() {
        let (mut scene, mut ctx) = entered();
        assert!(press(&mut scene, &mut ctx, InputSnapshot::new().with_pressed(Key::Esc)));
    }
}
