//! Entity registry: a dense, capped store of entities addressed by handles.
//!
//! Entities are kept in creation order. Destroying one compacts the store
//! while preserving the relative order of the rest.
//!
//! Hooks cannot borrow the registry while it iterates, so structural changes
//! they request (spawn, destroy, deactivate) go through [`HookContext`] and
//! are applied as soon as the hook returns:
//!
//! - **Update phase**: after every hook. Spawned entities are appended and are
//!   visited later in the same pass; destroyed ones are gone for the rest of it.
//! - **Collision phase**: after both hooks of a pair. Destroyed and
//!   deactivated entities drop out of the pairs tested next; removal and
//!   spawns wait for the end of the pass so pair indices stay valid.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::audio::Audio;
use crate::entity::{Behavior, Entity, EntityHandle};
use crate::term::{Sprite, Surface};
use crate::types::{InputSnapshot, Vector2, MAX_ENTITIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("entity registry is full ({capacity} entities)")]
    Full { capacity: usize },
}

/// Frame-wide services shared by every hook of one phase.
pub struct FrameServices<'a> {
    pub input: &'a InputSnapshot,
    pub audio: &'a mut dyn Audio,
    pub width: u16,
    pub height: u16,
    pub frame: u64,
}

#[derive(Debug)]
struct Deferred<K> {
    spawned: Vec<Entity<K>>,
    deactivated: Vec<EntityHandle>,
    destroyed: Vec<EntityHandle>,
    free: usize,
    capacity: usize,
    next_id: u32,
}

impl<K> Deferred<K> {
    fn new(capacity: usize) -> Self {
        Self {
            spawned: Vec::with_capacity(capacity),
            deactivated: Vec::with_capacity(MAX_ENTITIES),
            destroyed: Vec::with_capacity(MAX_ENTITIES),
            free: 0,
            capacity,
            next_id: 0,
        }
    }

    fn alloc_handle(&mut self) -> EntityHandle {
        let handle = EntityHandle::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        handle
    }

    fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.deactivated.is_empty() && self.destroyed.is_empty()
    }

    fn clear(&mut self) {
        self.spawned.clear();
        self.deactivated.clear();
        self.destroyed.clear();
    }
}

/// What an entity hook can see and do.
pub struct HookContext<'a, K> {
    pub input: &'a InputSnapshot,
    pub audio: &'a mut dyn Audio,
    pub width: u16,
    pub height: u16,
    pub frame: u64,
    deferred: &'a mut Deferred<K>,
}

impl<'a, K: Behavior> HookContext<'a, K> {
    fn new(services: &'a mut FrameServices<'_>, deferred: &'a mut Deferred<K>) -> Self {
        Self {
            input: services.input,
            audio: &mut *services.audio,
            width: services.width,
            height: services.height,
            frame: services.frame,
            deferred,
        }
    }

    /// Create an entity; it joins the registry when the hook returns.
    ///
    /// Capacity is checked now, so `Ok` means the entity will exist.
    pub fn spawn(
        &mut self,
        x: i32,
        y: i32,
        sprite: Option<Sprite>,
    ) -> Result<&mut Entity<K>, RegistryError> {
        if self.deferred.spawned.len() >= self.deferred.free {
            log::debug!("spawn from hook refused: registry full");
            return Err(RegistryError::Full {
                capacity: self.deferred.capacity,
            });
        }
        let handle = self.deferred.alloc_handle();
        let idx = self.deferred.spawned.len();
        self.deferred.spawned.push(Entity::new(handle, x, y, sprite));
        Ok(&mut self.deferred.spawned[idx])
    }

    /// Remove an entity. It is skipped by the rest of the phase at once;
    /// unknown handles are ignored.
    pub fn destroy(&mut self, handle: EntityHandle) {
        self.deferred.destroyed.push(handle);
    }

    pub fn deactivate(&mut self, handle: EntityHandle) {
        self.deferred.deactivated.push(handle);
    }

    pub fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.audio.play_tone(frequency_hz, duration_ms);
    }

    /// Is `pos` a visible cell?
    pub fn on_screen(&self, pos: Vector2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }
}

/// Bounded collection of entities.
#[derive(Debug)]
pub struct EntityRegistry<K> {
    entities: ArrayVec<Entity<K>, MAX_ENTITIES>,
    capacity: usize,
    deferred: Deferred<K>,
}

impl<K: Behavior> EntityRegistry<K> {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }

    /// Registry holding at most `capacity` entities (clamped to [`MAX_ENTITIES`]).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_ENTITIES);
        Self {
            entities: ArrayVec::new(),
            capacity,
            deferred: Deferred::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|e| e.active).count()
    }

    /// Create an active entity with zero velocity, default kind and default health.
    pub fn create(
        &mut self,
        x: i32,
        y: i32,
        sprite: Option<Sprite>,
    ) -> Result<EntityHandle, RegistryError> {
        self.spawn(x, y, sprite).map(|e| e.handle())
    }

    /// Like [`create`](Self::create) but hands back the entity for configuration.
    pub fn spawn(
        &mut self,
        x: i32,
        y: i32,
        sprite: Option<Sprite>,
    ) -> Result<&mut Entity<K>, RegistryError> {
        if self.entities.len() >= self.capacity {
            log::debug!("entity registry full ({})", self.capacity);
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        let handle = self.deferred.alloc_handle();
        let idx = self.entities.len();
        self.entities
            .try_push(Entity::new(handle, x, y, sprite))
            .map_err(|_| RegistryError::Full {
                capacity: self.capacity,
            })?;
        Ok(&mut self.entities[idx])
    }

    /// Remove an entity, keeping the others in order.
    ///
    /// Returns `false` (and does nothing) when `handle` is not registered.
    pub fn destroy(&mut self, handle: EntityHandle) -> bool {
        match self.index_of(handle) {
            Some(i) => {
                self.entities.remove(i);
                true
            }
            None => false,
        }
    }

    /// Destroy every entity. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.entities.len();
        self.entities.clear();
        self.deferred.clear();
        if n > 0 {
            log::debug!("destroyed {} entities", n);
        }
        n
    }

    /// Drop inactive entities now instead of waiting for the scene to exit.
    pub fn prune_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.active);
        before - self.entities.len()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity<K>> {
        self.entities.iter().find(|e| e.handle() == handle)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity<K>> {
        self.entities.iter_mut().find(|e| e.handle() == handle)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.index_of(handle).is_some()
    }

    fn index_of(&self, handle: EntityHandle) -> Option<usize> {
        self.entities.iter().position(|e| e.handle() == handle)
    }

    /// All entities, active or not, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity<K>> {
        self.entities.iter()
    }

    pub fn for_each_active(&self, mut f: impl FnMut(&Entity<K>)) {
        for e in self.entities.iter().filter(|e| e.active) {
            f(e);
        }
    }

    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut Entity<K>)) {
        for e in self.entities.iter_mut().filter(|e| e.active) {
            f(e);
        }
    }

    /// Update phase: move every active entity by its velocity, then run its update hook.
    pub fn update(&mut self, services: &mut FrameServices<'_>) {
        let mut i = 0;
        while i < self.entities.len() {
            self.deferred.free = self.capacity.saturating_sub(self.entities.len());

            let entity = &mut self.entities[i];
            if !entity.active {
                i += 1;
                continue;
            }
            entity.position += entity.velocity;

            let mut cx = HookContext::new(services, &mut self.deferred);
            K::on_update(entity, &mut cx);

            i = self.apply_deferred(i + 1);
        }
    }

    /// Collision phase: test every pair of active, sprited entities and run
    /// both collide hooks on overlap. Returns the number of overlapping pairs.
    pub fn check_collisions(&mut self, services: &mut FrameServices<'_>) -> usize {
        let n = self.entities.len();
        self.deferred.free = self.capacity.saturating_sub(n);
        let mut hits = 0;
        let mut retired = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.entities.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if !a.active || !b.active {
                    continue;
                }
                let (Some(box_a), Some(box_b)) = (a.bounds(), b.bounds()) else {
                    continue;
                };
                if !box_a.overlaps(&box_b) {
                    continue;
                }

                hits += 1;
                let mut cx = HookContext::new(services, &mut self.deferred);
                K::on_collide(a, b, &mut cx);
                K::on_collide(b, a, &mut cx);

                retired = self.retire_requested(retired);
            }
        }

        self.apply_deferred(n);
        hits
    }

    /// Render phase: run the render hook of every active entity that has a sprite.
    pub fn render(&self, surface: &mut Surface) {
        for e in self.entities.iter() {
            if e.active && e.sprite.is_some() {
                K::on_render(e, surface);
            }
        }
    }

    /// Mark entities deactivated or destroyed by hooks as inactive so they
    /// skip the rest of the collision pass. Destroy requests from index
    /// `from` on are new; the new watermark is returned.
    fn retire_requested(&mut self, from: usize) -> usize {
        let Self {
            entities, deferred, ..
        } = self;
        let pending = deferred.destroyed[from..].iter();
        for handle in deferred.deactivated.drain(..).chain(pending.copied()) {
            if let Some(e) = entities.iter_mut().find(|e| e.handle() == handle) {
                e.active = false;
            }
        }
        deferred.destroyed.len()
    }

    /// Apply queued hook requests. `next` is the index the caller visits next;
    /// the adjusted index is returned.
    fn apply_deferred(&mut self, mut next: usize) -> usize {
        if self.deferred.is_empty() {
            return next;
        }

        for entity in self.deferred.spawned.drain(..) {
            if self.entities.len() >= self.capacity {
                log::warn!("dropping spawned entity {:?}: registry full", entity.handle());
                continue;
            }
            if let Err(err) = self.entities.try_push(entity) {
                log::warn!("dropping spawned entity {:?}: registry full", err.element().handle());
            }
        }

        for handle in self.deferred.deactivated.drain(..) {
            if let Some(e) = self.entities.iter_mut().find(|e| e.handle() == handle) {
                e.active = false;
            }
        }

        for handle in self.deferred.destroyed.drain(..) {
            if let Some(j) = self.entities.iter().position(|e| e.handle() == handle) {
                self.entities.remove(j);
                if j < next {
                    next -= 1;
                }
            }
        }

        next
    }
}

impl<K: Behavior> Default for EntityRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
