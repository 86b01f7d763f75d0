/// Snapshot of the inputs the game cares about, taken once per frame.
///
/// Both fields trigger the same "activate" action (jump); the split only
/// records where it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Up arrow (or Space) currently held
    pub activate_key: bool,
    /// Mouse button or touch currently pressed
    pub pointer_down: bool,
}

impl InputState {
    pub fn idle() -> Self {
        InputState::default()
    }

    pub fn key() -> Self {
        InputState {
            activate_key: true,
            pointer_down: false,
        }
    }

    pub fn pointer() -> Self {
        InputState {
            activate_key: false,
            pointer_down: true,
        }
    }

    pub fn activate_held(&self) -> bool {
        self.activate_key || self.pointer_down
    }
}

/// Anything that can report the current input state (keyboard backend,
/// replay script, test double).
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed sequence of states, then reports idle forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<InputState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        self.frames.pop_front().unwrap_or_default()
    }
}
