//! Entities and their per-kind behavior.
//!
//! Behavior is selected by the entity's `kind`: a game defines one enum of
//! kinds and implements [`Behavior`] for it. Each hook has a default, so a kind
//! only overrides what it reacts to.

use crate::collision::Aabb;
use crate::registry::HookContext;
use crate::term::{Sprite, Surface};
use crate::types::{Vector2, DEFAULT_HEALTH};

/// Stable reference to a registry entry. Never reused by the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(u32);

impl EntityHandle {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// A dynamic game object owned by an [`EntityRegistry`](crate::EntityRegistry).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<K> {
    handle: EntityHandle,
    pub position: Vector2,
    pub velocity: Vector2,
    pub sprite: Option<Sprite>,
    pub active: bool,
    pub kind: K,
    pub health: i32,
}

impl<K: Default> Entity<K> {
    pub(crate) fn new(handle: EntityHandle, x: i32, y: i32, sprite: Option<Sprite>) -> Self {
        Self {
            handle,
            position: Vector2::new(x, y),
            velocity: Vector2::ZERO,
            sprite,
            active: true,
            kind: K::default(),
            health: DEFAULT_HEALTH,
        }
    }
}

impl<K> Entity<K> {
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Bounding box from the sprite size; `None` for entities without a sprite.
    pub fn bounds(&self) -> Option<Aabb> {
        self.sprite.as_ref().map(|s| Aabb {
            x: self.position.x,
            y: self.position.y,
            w: s.width() as i32,
            h: s.height() as i32,
        })
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Chainable setters for configuring an entity right after creation.
    pub fn set_kind(&mut self, kind: K) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn set_velocity(&mut self, x: i32, y: i32) -> &mut Self {
        self.velocity = Vector2::new(x, y);
        self
    }

    pub fn set_health(&mut self, health: i32) -> &mut Self {
        self.health = health;
        self
    }
}

/// Per-kind hooks run by the registry during the update, collision and render phases.
pub trait Behavior: Default + Sized + 'static {
    /// Runs after velocity was applied to the position.
    fn on_update(entity: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        let _ = (entity, cx);
    }

    /// Runs when `this` overlaps `other`. Called once for each side of a pair.
    fn on_collide(this: &mut Entity<Self>, other: &mut Entity<Self>, cx: &mut HookContext<'_, Self>) {
        let _ = (this, other, cx);
    }

    /// Draw the entity. The default draws its sprite at its position.
    fn on_render(entity: &Entity<Self>, surface: &mut Surface) {
        if let Some(sprite) = &entity.sprite {
            surface.draw_sprite(sprite, entity.position.x, entity.position.y);
        }
    }
}

/// Entities without any behavior.
impl Behavior for () {}
