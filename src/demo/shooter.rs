//! Shooter: move the player, shoot down the enemies falling from the top.

use std::time::Duration;

use crate::core::{Behavior, Context, Entity, HookContext, Scene, SceneAction, SimpleRng};
use crate::term::Sprite;
use crate::types::{Color, Key};

use super::menu::MenuScene;

pub const PLAYER_ART: [&str; 3] = [" O ", "/|\\", "/ \\"];
pub const ENEMY_ART: [&str; 3] = ["\\O/", " | ", "/ \\"];
pub const BULLET_ART: [&str; 1] = ["!"];

pub const SHOOT_COOLDOWN_FRAMES: u8 = 10;
pub const ENEMY_HEALTH: i32 = 30;
pub const BULLET_DAMAGE: i32 = 10;
/// Chance per frame, in percent, that a new enemy enters from the top.
pub const ENEMY_SPAWN_PERCENT: u32 = 5;
pub const INITIAL_ENEMIES: i32 = 5;

pub const SHOT_TONE: (u32, u32) = (800, 50);
pub const KILL_TONE: (u32, u32) = (400, 100);

/// Entity kinds of the demo. Every demo scene shares one context, so this is
/// also the kind type of the menu and the path integral scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShooterKind {
    #[default]
    Scenery,
    Player {
        cooldown: u8,
    },
    Enemy,
    Bullet,
}

impl Behavior for ShooterKind {
    fn on_update(entity: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        match entity.kind {
            ShooterKind::Player { cooldown } => update_player(entity, cooldown, cx),
            ShooterKind::Enemy => {
                entity.position.y += 1;
                if entity.position.y >= cx.height as i32 {
                    entity.deactivate();
                }
            }
            ShooterKind::Bullet => {
                if entity.position.y < 0 || entity.position.y >= cx.height as i32 {
                    entity.deactivate();
                }
            }
            ShooterKind::Scenery => {}
        }
    }

    fn on_collide(this: &mut Entity<Self>, other: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        if this.kind != ShooterKind::Bullet || other.kind != ShooterKind::Enemy {
            return;
        }
        other.health -= BULLET_DAMAGE;
        this.deactivate();
        if other.health <= 0 {
            other.deactivate();
            cx.play_tone(KILL_TONE.0, KILL_TONE.1);
        }
    }
}

fn update_player(entity: &mut Entity<ShooterKind>, cooldown: u8, cx: &mut HookContext<'_, ShooterKind>) {
    let max_x = cx.width as i32 - PLAYER_ART[0].len() as i32;
    let max_y = cx.height as i32 - PLAYER_ART.len() as i32;
    let input = cx.input;
    let pos = &mut entity.position;

    if input.is_down(Key::Left) {
        pos.x = (pos.x - 2).max(0);
    }
    if input.is_down(Key::Right) {
        pos.x = (pos.x + 2).min(max_x);
    }
    if input.is_down(Key::Up) {
        pos.y = (pos.y - 1).max(0);
    }
    if input.is_down(Key::Down) {
        pos.y = (pos.y + 1).min(max_y);
    }

    let mut cooldown = cooldown;
    if input.is_down(Key::Space) && cooldown == 0 {
        let (x, y) = (pos.x + 1, pos.y - 1);
        match Sprite::from_art(&BULLET_ART, Color::WHITE) {
            Ok(sprite) => {
                if let Ok(bullet) = cx.spawn(x, y, Some(sprite)) {
                    bullet.set_kind(ShooterKind::Bullet).set_velocity(0, -2);
                    cx.play_tone(SHOT_TONE.0, SHOT_TONE.1);
                }
            }
            Err(err) => log::warn!("bullet sprite: {}", err),
        }
        cooldown = SHOOT_COOLDOWN_FRAMES;
    }
    entity.kind = ShooterKind::Player {
        cooldown: cooldown.saturating_sub(1),
    };
}

pub struct ShooterScene {
    rng: SimpleRng,
}

impl ShooterScene {
    pub fn new() -> Self {
        Self::with_rng(SimpleRng::from_time())
    }

    /// Deterministic enemy spawns, for tests and replays.
    pub fn with_rng(rng: SimpleRng) -> Self {
        Self { rng }
    }

    fn spawn_enemy(ctx: &mut Context<ShooterKind>, x: i32, y: i32) -> Option<&mut Entity<ShooterKind>> {
        let sprite = match Sprite::from_art(&ENEMY_ART, Color::RED) {
            Ok(sprite) => sprite,
            Err(err) => {
                log::warn!("enemy sprite: {}", err);
                return None;
            }
        };
        match ctx.entities.spawn(x, y, Some(sprite)) {
            Ok(enemy) => Some(enemy.set_kind(ShooterKind::Enemy).set_health(ENEMY_HEALTH)),
            Err(err) => {
                log::debug!("no room for enemy: {}", err);
                None
            }
        }
    }
}

impl Default for ShooterScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShooterKind> for ShooterScene {
    fn name(&self) -> &str {
        "Shooter"
    }

    fn enter(&mut self, ctx: &mut Context<ShooterKind>) {
        let (w, h) = (ctx.width() as i32, ctx.height() as i32);
        match Sprite::from_art(&PLAYER_ART, Color::GREEN) {
            Ok(sprite) => match ctx.entities.spawn(w / 2, h - 5, Some(sprite)) {
                Ok(player) => {
                    player.set_kind(ShooterKind::Player { cooldown: 0 });
                }
                Err(err) => log::warn!("no room for the player: {}", err),
            },
            Err(err) => log::warn!("player sprite: {}", err),
        }

        for i in 0..INITIAL_ENEMIES {
            Self::spawn_enemy(ctx, 5 + i * 8, 5);
        }
    }

    fn update(&mut self, ctx: &mut Context<ShooterKind>, _dt: Duration) -> SceneAction<ShooterKind> {
        if ctx.input.just_pressed(Key::Esc) {
            return SceneAction::Switch(Box::new(MenuScene::new()));
        }

        if self.rng.chance(ENEMY_SPAWN_PERCENT) {
            let x = self.rng.next_range(ctx.width().saturating_sub(5) as u32) as i32;
            if let Some(enemy) = Self::spawn_enemy(ctx, x, 0) {
                enemy.set_velocity(0, 1);
            }
        }

        ctx.step_entities();
        SceneAction::Continue
    }

    fn render(&mut self, ctx: &mut Context<ShooterKind>) {
        ctx.surface.draw_border(Color::GREY);
        ctx.render_entities();

        let score = format!("Score: {}", ctx.frame_count);
        ctx.surface.draw_text(&score, 2, 1, Color::WHITE);
    }
}
