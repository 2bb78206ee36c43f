//! Scenes: self-contained modes (menu, level, visualizer) with their own update and render.
//!
//! Exactly one scene is current. A change runs the outgoing scene's `exit`
//! before the incoming scene's `enter`; scenes are replaced, never stacked.

use std::time::Duration;

use crate::context::Context;
use crate::entity::Behavior;

/// What the scheduler should do after a scene update.
pub enum SceneAction<K: Behavior> {
    Continue,
    /// Replace the current scene. The new scene renders in the same frame.
    Switch(Box<dyn Scene<K>>),
}

impl<K: Behavior> std::fmt::Debug for SceneAction<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneAction::Continue => f.write_str("Continue"),
            SceneAction::Switch(next) => f.debug_tuple("Switch").field(&next.name()).finish(),
        }
    }
}

pub trait Scene<K: Behavior> {
    fn name(&self) -> &str;

    fn enter(&mut self, ctx: &mut Context<K>) {
        let _ = ctx;
    }

    /// Advance one frame. Not called while the engine is paused.
    fn update(&mut self, ctx: &mut Context<K>, dt: Duration) -> SceneAction<K>;

    /// Draw into `ctx.surface`, which was cleared for this frame.
    fn render(&mut self, ctx: &mut Context<K>);

    /// Leave the scene. The default destroys every entity.
    fn exit(&mut self, ctx: &mut Context<K>) {
        ctx.entities.clear();
    }
}

/// Owns the current scene and runs its lifecycle.
pub struct SceneManager<K: Behavior> {
    current: Option<Box<dyn Scene<K>>>,
    transitions: u64,
}

impl<K: Behavior> SceneManager<K> {
    pub fn new() -> Self {
        Self {
            current: None,
            transitions: 0,
        }
    }

    /// Exit the current scene (if any), then enter `next`.
    pub fn change_scene(&mut self, mut next: Box<dyn Scene<K>>, ctx: &mut Context<K>) {
        if let Some(mut old) = self.current.take() {
            log::info!("scene exit: {}", old.name());
            old.exit(ctx);
        }
        log::info!("scene enter: {}", next.name());
        next.enter(ctx);
        self.current = Some(next);
        self.transitions += 1;
    }

    /// Update the current scene and apply a requested switch before returning.
    pub fn update(&mut self, ctx: &mut Context<K>, dt: Duration) {
        let Some(scene) = self.current.as_mut() else {
            return;
        };
        if let SceneAction::Switch(next) = scene.update(ctx, dt) {
            self.change_scene(next, ctx);
        }
    }

    pub fn render(&mut self, ctx: &mut Context<K>) {
        if let Some(scene) = self.current.as_mut() {
            scene.render(ctx);
        }
    }

    /// Exit the current scene, leaving none.
    pub fn shutdown(&mut self, ctx: &mut Context<K>) {
        if let Some(mut scene) = self.current.take() {
            log::info!("scene exit: {}", scene.name());
            scene.exit(ctx);
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref().map(|s| s.name())
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Number of scenes entered so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl<K: Behavior> Default for SceneManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        journal: Journal,
        next: Option<Box<dyn Scene<()>>>,
    }

    impl Recorder {
        fn boxed(name: &'static str, journal: &Journal) -> Box<Self> {
            Box::new(Self {
                name,
                journal: journal.clone(),
                next: None,
            })
        }

        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{}.{}", self.name, event));
        }
    }

    impl Scene<()> for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn enter(&mut self, _ctx: &mut Context<()>) {
            self.log("enter");
        }

        fn update(&mut self, _ctx: &mut Context<()>, _dt: Duration) -> SceneAction<()> {
            self.log("update");
            match self.next.take() {
                Some(next) => SceneAction::Switch(next),
                None => SceneAction::Continue,
            }
        }

        fn render(&mut self, _ctx: &mut Context<()>) {
            self.log("render");
        }

        fn exit(&mut self, ctx: &mut Context<()>) {
            self.log("exit");
            ctx.entities.clear();
        }
    }

    fn ctx() -> Context<()> {
        Context::new(8, 4, Box::new(NullAudio))
    }

    fn take(journal: &Journal) -> Vec<String> {
        journal.borrow_mut().drain(..).collect()
    }

    #[test]
    fn change_scene_exits_before_entering() {
        let journal = Journal::default();
        let mut ctx = ctx();
        let mut scenes = SceneManager::new();
        assert!(!scenes.is_active());

        scenes.change_scene(Recorder::boxed("a", &journal), &mut ctx);
        scenes.change_scene(Recorder::boxed("b", &journal), &mut ctx);

        assert_eq!(take(&journal), ["a.enter", "a.exit", "b.enter"]);
        assert_eq!(scenes.current_name(), Some("b"));
        assert_eq!(scenes.transitions(), 2);
    }

    #[test]
    fn switch_from_update_renders_the_new_scene_that_frame() {
        let journal = Journal::default();
        let mut ctx = ctx();
        let mut scenes = SceneManager::new();

        let mut a = Recorder::boxed("a", &journal);
        a.next = Some(Recorder::boxed("b", &journal));
        scenes.change_scene(a, &mut ctx);
        take(&journal);

        scenes.update(&mut ctx, Duration::from_millis(16));
        scenes.render(&mut ctx);

        assert_eq!(take(&journal), ["a.update", "a.exit", "b.enter", "b.render"]);
    }

    #[test]
    fn default_exit_destroys_entities() {
        struct Bare;
        impl Scene<()> for Bare {
            fn name(&self) -> &str {
                "bare"
            }
            fn update(&mut self, _ctx: &mut Context<()>, _dt: Duration) -> SceneAction<()> {
                SceneAction::Continue
            }
            fn render(&mut self, _ctx: &mut Context<()>) {}
        }

        let mut ctx = ctx();
        let mut scenes = SceneManager::new();
        scenes.change_scene(Box::new(Bare), &mut ctx);
        for i in 0..3 {
            ctx.entities.create(i, 0, None).unwrap();
        }
        scenes.shutdown(&mut ctx);

        assert!(ctx.entities.is_empty());
        assert!(!scenes.is_active());
    }

    #[test]
    fn update_and_render_without_scene_do_nothing() {
        let mut ctx = ctx();
        let mut scenes = SceneManager::<()>::new();
        scenes.update(&mut ctx, Duration::ZERO);
        scenes.render(&mut ctx);
        scenes.shutdown(&mut ctx);
        assert_eq!(scenes.current_name(), None);
    }
}
