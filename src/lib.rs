//! Frog Runner: an auto-running arcade game.
//!
//! A frog runs across a scrolling level, jumping over walls and collecting
//! stars. The library holds the whole game logic and runs headless; the
//! `sdl` feature adds the desktop frontend (window, textures, audio, input).

pub mod animation;
pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod obstacle;
pub mod physics;
pub mod player;
pub mod sprite;

#[cfg(feature = "sdl")]
pub mod frontend;

pub use config::{GameConfig, SceneVariant};
pub use error::{ConfigError, GameError};
pub use game::{GameState, Scene, SceneEvent};
pub use input::InputState;
