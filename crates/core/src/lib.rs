//! Core runtime: entities, collision, scenes and the shared engine context.
//!
//! This crate has **no I/O**: it never touches the terminal, the clock or the
//! sound device. Everything that talks to the outside world sits behind a
//! trait ([`Audio`]) or lives in the engine crate, so the whole frame pipeline
//! can be driven from tests.
//!
//! # Module Structure
//!
//! - [`entity`]: entities, handles and the per-kind [`Behavior`] hooks
//! - [`registry`]: bounded entity store and the update/collision/render phases
//! - [`collision`]: axis-aligned bounding boxes
//! - [`scene`]: scene trait and the scene manager
//! - [`context`]: engine state passed through a frame
//! - [`audio`]: fire-and-forget tone sink
//! - [`rng`]: small deterministic RNG for gameplay
//!
//! # Example
//!
//! ```
//! use arrow_kernel_core::{Context, NullAudio};
//!
//! let mut ctx: Context<()> = Context::new(80, 25, Box::new(NullAudio));
//! let handle = ctx.entities.create(10, 5, None).unwrap();
//! ctx.entities.get_mut(handle).unwrap().set_velocity(1, 0);
//!
//! ctx.update_entities();
//! assert_eq!(ctx.entities.get(handle).unwrap().position.x, 11);
//! ```

pub mod audio;
pub mod collision;
pub mod context;
pub mod entity;
pub mod registry;
pub mod rng;
pub mod scene;

pub use arrow_kernel_term as term;
pub use arrow_kernel_types as types;

pub use audio::{Audio, NullAudio, Tone, ToneLog};
pub use collision::{overlaps, Aabb};
pub use context::Context;
pub use entity::{Behavior, Entity, EntityHandle};
pub use registry::{EntityRegistry, FrameServices, HookContext, RegistryError};
pub use rng::SimpleRng;
pub use scene::{Scene, SceneAction, SceneManager};
