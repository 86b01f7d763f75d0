// Per-run game state owned by the scene controller

/// Mutable state of one run, kept apart from the entities it describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    /// Only ever grows
    pub score: u32,
    /// One-way: once set, frames stop changing anything
    pub game_over: bool,
    /// Fall clip already triggered during the current airborne period
    pub falling: bool,
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    /// Add a pickup reward and return the new score.
    pub fn award(&mut self, reward: u32) -> u32 {
        self.score = self.score.saturating_add(reward);
        self.score
    }

    pub fn end(&mut self) {
        self.game_over = true;
    }
}
