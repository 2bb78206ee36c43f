//! Arrow kernel (workspace facade crate).
//!
//! A fixed-timestep terminal game kernel: scenes, a bounded entity registry
//! with per-kind behavior, AABB collision and a double-buffered character grid.
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `arrow_kernel::{core,engine,input,term,types}` and adds
//! the [`demo`] scenes played by the binary.

pub use arrow_kernel_core as core;
pub use arrow_kernel_engine as engine;
pub use arrow_kernel_input as input;
pub use arrow_kernel_term as term;
pub use arrow_kernel_types as types;

pub mod demo;
