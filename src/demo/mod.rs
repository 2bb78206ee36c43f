//! Playable content shipped with the kernel: a menu, a shooter and a
//! path integral visualizer. All three share one [`Context`] whose entity
//! kind is [`ShooterKind`].

pub mod menu;
pub mod path_integral;
pub mod shooter;

use crate::core::{Context, Scene};

pub use menu::MenuScene;
pub use path_integral::PathIntegralScene;
pub use shooter::{ShooterKind, ShooterScene};

pub type DemoContext = Context<ShooterKind>;

/// The scene the binary starts in.
pub fn initial_scene() -> Box<dyn Scene<ShooterKind>> {
    Box::new(MenuScene::new())
}
