//! The frame loop.
//!
//! One iteration:
//! 1. measure delta time since the previous iteration started
//! 2. poll input into the frame's snapshot and apply global bindings
//! 3. update the current scene (skipped while paused)
//! 4. clear the surface, render the scene, present
//! 5. sleep off the rest of the frame budget, or continue at once on overrun

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::EngineConfig;
use crate::core::{Audio, Behavior, Context, Scene, SceneManager};
use crate::input::InputSource;
use crate::pacing::{Clock, FramePacer, SystemClock};
use crate::term::{Presenter, Surface};
use crate::types::{Color, Key, SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS};

/// Toggles the paused flag on its press edge.
pub const PAUSE_KEY: Key = Key::Char('p');

pub struct Engine<K: Behavior, I, P> {
    ctx: Context<K>,
    scenes: SceneManager<K>,
    input: I,
    presenter: P,
    clock: Box<dyn Clock>,
    pacer: FramePacer,
    last_start: Option<Instant>,
}

impl<K, I, P> Engine<K, I, P>
where
    K: Behavior,
    I: InputSource,
    P: Presenter,
{
    pub fn new(ctx: Context<K>, input: I, presenter: P) -> Self {
        Self {
            ctx,
            scenes: SceneManager::new(),
            input,
            presenter,
            clock: Box::new(SystemClock),
            pacer: FramePacer::new(TARGET_FPS),
            last_start: None,
        }
    }

    /// Engine with an 80x25 surface, sized and paced by `config`.
    pub fn from_config(config: &EngineConfig, audio: Box<dyn Audio>, input: I, presenter: P) -> Self {
        let ctx = Context::new(SCREEN_WIDTH, SCREEN_HEIGHT, audio).with_entity_capacity(config.max_entities);
        Self::new(ctx, input, presenter).with_fps(config.fps)
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.pacer = FramePacer::new(fps);
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Exit the current scene (if any) and enter `scene`.
    pub fn set_scene(&mut self, scene: Box<dyn Scene<K>>) {
        self.scenes.change_scene(scene, &mut self.ctx);
    }

    pub fn context(&self) -> &Context<K> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context<K> {
        &mut self.ctx
    }

    pub fn scenes(&self) -> &SceneManager<K> {
        &self.scenes
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    /// Run exactly one frame.
    pub fn step(&mut self) -> Result<()> {
        let start = self.clock.now();
        let dt = self
            .last_start
            .map(|last| start.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_start = Some(start);
        self.ctx.delta_time = dt;

        let input = self.input.poll()?;
        self.ctx.input = input;
        if input.quit {
            log::info!("quit requested");
            self.ctx.stop();
        }
        if input.resized {
            self.presenter.invalidate();
        }
        if input.just_pressed(PAUSE_KEY) {
            self.ctx.paused = !self.ctx.paused;
            log::debug!("paused: {}", self.ctx.paused);
        }

        if self.ctx.running && !self.ctx.paused {
            self.scenes.update(&mut self.ctx, dt);
        }

        self.ctx.surface.clear();
        self.scenes.render(&mut self.ctx);
        if self.ctx.paused {
            draw_overlay_text(&mut self.ctx.surface, "PAUSED");
        }
        self.presenter.present(&self.ctx.surface)?;

        let elapsed = self.clock.now().saturating_duration_since(start);
        match self.pacer.remaining(elapsed) {
            Some(rest) => self.clock.sleep(rest),
            None if elapsed > self.pacer.budget() => {
                log::debug!(
                    "frame {} overran: {:?} > {:?}",
                    self.ctx.frame_count,
                    elapsed,
                    self.pacer.budget()
                );
            }
            None => {}
        }

        self.ctx.frame_count += 1;
        Ok(())
    }

    /// Loop until the running flag is cleared, then shut down.
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "engine loop started ({:?} per frame, scene: {})",
            self.pacer.budget(),
            self.scenes.current_name().unwrap_or("none")
        );

        let mut result = Ok(());
        while self.ctx.running {
            if let Err(err) = self.step() {
                result = Err(err);
                break;
            }
        }

        self.shutdown();
        log::info!(
            "engine loop stopped after {} frames ({} overruns)",
            self.ctx.frame_count,
            self.pacer.overruns()
        );
        result
    }

    /// Exit the current scene and destroy all remaining entities.
    pub fn shutdown(&mut self) {
        self.scenes.shutdown(&mut self.ctx);
        self.ctx.entities.clear();
    }
}

fn draw_overlay_text(surface: &mut Surface, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = surface.width().saturating_sub(text_w) / 2;
    let y = surface.height() / 2;
    surface.draw_text(text, x as i32, y as i32, Color::YELLOW);
}
