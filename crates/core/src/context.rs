//! Engine state shared by the scheduler, the scenes and the entity registry.

use std::time::Duration;

use crate::audio::Audio;
use crate::entity::Behavior;
use crate::registry::{EntityRegistry, FrameServices};
use crate::term::Surface;
use crate::types::InputSnapshot;

/// Created once at startup and passed by `&mut` to everything that runs in a frame.
pub struct Context<K> {
    /// Cleared to stop the frame loop after the current iteration.
    pub running: bool,
    /// While set, scene updates are skipped; rendering continues.
    pub paused: bool,
    /// Wall-clock time since the previous iteration started.
    pub delta_time: Duration,
    pub frame_count: u64,
    /// Input sampled at the start of this frame.
    pub input: InputSnapshot,
    pub entities: EntityRegistry<K>,
    pub surface: Surface,
    pub audio: Box<dyn Audio>,
}

impl<K: Behavior> Context<K> {
    pub fn new(width: u16, height: u16, audio: Box<dyn Audio>) -> Self {
        Self {
            running: true,
            paused: false,
            delta_time: Duration::ZERO,
            frame_count: 0,
            input: InputSnapshot::new(),
            entities: EntityRegistry::new(),
            surface: Surface::new(width, height),
            audio,
        }
    }

    /// Replace the registry with an empty one holding at most `capacity` entities.
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entities = EntityRegistry::with_capacity(capacity);
        self
    }

    pub fn width(&self) -> u16 {
        self.surface.width()
    }

    pub fn height(&self) -> u16 {
        self.surface.height()
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.audio.play_tone(frequency_hz, duration_ms);
    }

    /// Entity update phase (movement + update hooks).
    pub fn update_entities(&mut self) {
        let mut services = FrameServices {
            input: &self.input,
            audio: self.audio.as_mut(),
            width: self.surface.width(),
            height: self.surface.height(),
            frame: self.frame_count,
        };
        self.entities.update(&mut services);
    }

    /// Collision phase. Returns the number of overlapping pairs.
    pub fn check_collisions(&mut self) -> usize {
        let mut services = FrameServices {
            input: &self.input,
            audio: self.audio.as_mut(),
            width: self.surface.width(),
            height: self.surface.height(),
            frame: self.frame_count,
        };
        self.entities.check_collisions(&mut services)
    }

    /// Update then collide; what a scene's `update` normally calls once per frame.
    pub fn step_entities(&mut self) -> usize {
        self.update_entities();
        self.check_collisions()
    }

    pub fn render_entities(&mut self) {
        self.entities.render(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NullAudio, ToneLog};
    use crate::entity::Entity;
    use crate::registry::HookContext;
    use crate::term::Sprite;
    use crate::types::{Color, Key};

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    enum Kind {
        #[default]
        Plain,
        /// Moves right while `d` is held and beeps on contact.
        Steered,
    }

    impl Behavior for Kind {
        fn on_update(entity: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
            if entity.kind == Kind::Steered && cx.input.is_down(Key::Char('d')) {
                entity.position.x += 1;
            }
        }

        fn on_collide(this: &mut Entity<Self>, _other: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
            if this.kind == Kind::Steered {
                cx.play_tone(440, 10);
            }
        }
    }

    fn block() -> Option<Sprite> {
        Some(Sprite::from_art(&["#"], Color::WHITE).unwrap())
    }

    #[test]
    fn hooks_see_the_frame_input_and_audio() {
        let log = ToneLog::new();
        let mut ctx: Context<Kind> = Context::new(10, 3, Box::new(log.clone()));
        ctx.entities.spawn(0, 0, block()).unwrap().set_kind(Kind::Steered);
        ctx.entities.create(2, 0, block()).unwrap();

        ctx.input = InputSnapshot::new().with_held(Key::Char('d'));
        assert_eq!(ctx.step_entities(), 0);
        assert_eq!(ctx.step_entities(), 1);
        assert_eq!(log.len(), 1);

        ctx.surface.clear();
        ctx.render_entities();
        assert_eq!(ctx.surface.row_text(0), "  #       ");
    }

    #[test]
    fn entity_capacity_is_configurable() {
        let mut ctx: Context<()> = Context::new(4, 4, Box::new(NullAudio)).with_entity_capacity(2);
        ctx.entities.create(0, 0, None).unwrap();
        ctx.entities.create(0, 0, None).unwrap();
        assert!(ctx.entities.create(0, 0, None).is_err());
        assert_eq!((ctx.width(), ctx.height()), (4, 4));
    }

    #[test]
    fn stop_clears_running() {
        let mut ctx: Context<()> = Context::new(1, 1, Box::new(NullAudio));
        assert!(ctx.running);
        ctx.stop();
        assert!(!ctx.running);
    }
}
