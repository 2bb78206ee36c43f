//! Title menu: pick a scene or quit.

use std::time::Duration;

use crate::core::{Context, Scene, SceneAction};
use crate::types::{Color, Key};

use super::path_integral::PathIntegralScene;
use super::shooter::{ShooterKind, ShooterScene};

pub const TITLE: &str = "ARROW tv 3A Game Kernel";

#[derive(Debug, Default)]
pub struct MenuScene;

impl MenuScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene<ShooterKind> for MenuScene {
    fn name(&self) -> &str {
        "Menu"
    }

    fn update(&mut self, ctx: &mut Context<ShooterKind>, _dt: Duration) -> SceneAction<ShooterKind> {
        let input = ctx.input;
        if input.just_pressed(Key::Char('1')) {
            return SceneAction::Switch(Box::new(ShooterScene::new()));
        }
        if input.just_pressed(Key::Char('2')) {
            return SceneAction::Switch(Box::new(PathIntegralScene::new()));
        }
        if input.just_pressed(Key::Esc) {
            log::info!("quit from menu");
            ctx.stop();
        }
        SceneAction::Continue
    }

    fn render(&mut self, ctx: &mut Context<ShooterKind>) {
        let s = &mut ctx.surface;
        s.draw_text(TITLE, 28, 5, Color::YELLOW);
        s.draw_hline(25, 6, 25, '=', Color::YELLOW);

        s.draw_text("Select a scene:", 30, 10, Color::CYAN);
        s.draw_text("1 - Shooter Game", 30, 12, Color::CYAN);
        s.draw_text("2 - Path Integral Visualizer", 30, 13, Color::CYAN);
        s.draw_text("ESC - Exit", 30, 15, Color::CYAN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NullAudio;
    use crate::types::{InputSnapshot, SCREEN_HEIGHT, SCREEN_WIDTH};

    fn ctx_with(input: InputSnapshot) -> Context<ShooterKind> {
        let mut ctx = Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, Box::new(NullAudio));
        ctx.input = input;
        ctx
    }

    fn target(action: SceneAction<ShooterKind>) -> Option<String> {
        match action {
            SceneAction::Switch(next) => Some(next.name().to_string()),
            SceneAction::Continue => None,
        }
    }

    #[test]
    fn digits_select_scenes() {
        let mut menu = MenuScene::new();
        let mut ctx = ctx_with(InputSnapshot::new().with_pressed(Key::Char('1')));
        assert_eq!(target(menu.update(&mut ctx, Duration::ZERO)).as_deref(), Some("Shooter"));

        let mut ctx = ctx_with(InputSnapshot::new().with_pressed(Key::Char('2')));
        assert_eq!(target(menu.update(&mut ctx, Duration::ZERO)).as_deref(), Some("PathIntegral"));
    }

    #[test]
    fn held_digit_does_not_retrigger() {
        let mut menu = MenuScene::new();
        let mut ctx = ctx_with(InputSnapshot::new().with_held(Key::Char('1')));
        assert_eq!(target(menu.update(&mut ctx, Duration::ZERO)), None);
    }

    #[test]
    fn esc_stops_the_engine() {
        let mut menu = MenuScene::new();
        let mut ctx = ctx_with(InputSnapshot::new().with_pressed(Key::Esc));
        assert_eq!(target(menu.update(&mut ctx, Duration::ZERO)), None);
        assert!(!ctx.running);
    }

    #[test]
    fn render_shows_title_and_options() {
        let mut menu = MenuScene::new();
        let mut ctx = ctx_with(InputSnapshot::new());
        menu.render(&mut ctx);
        assert!(ctx.surface.row_text(5).contains(TITLE));
        assert!(ctx.surface.row_text(12).contains("1 - Shooter Game"));
        assert_eq!(ctx.surface.get(28, 5).unwrap().color, Color::YELLOW);
    }
}
