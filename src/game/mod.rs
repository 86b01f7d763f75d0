// Game module - scene controller and the state it owns
//
// This module contains:
// - scene.rs: Scene controller (initialize, per-frame update, contact callbacks)
// - state.rs: GameState (score, game-over, fall debounce)
// - events.rs: SceneEvent and the audio collaborator seam

pub mod events;
pub mod scene;
pub mod state;

// Re-export types for convenience
pub use events::{dispatch_sounds, AudioSink, SceneEvent, SoundKey};
pub use scene::{Background, Scene, TextLabel, GAME_OVER_TINT};
pub use state::GameState;
