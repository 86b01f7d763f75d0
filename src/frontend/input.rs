use crate::input::{InputSource, InputState};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::EventPump;

/// Discrete actions produced by key presses, as opposed to the held state
/// the scene reads every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    ToggleDebugPhysics,
    Quit,
}

/// Owns the SDL event pump: translates events into [`GameAction`]s and
/// answers [`InputSource::poll`] from the keyboard and mouse state.
pub struct InputSystem {
    event_pump: EventPump,
}

impl InputSystem {
    pub fn new(event_pump: EventPump) -> Self {
        InputSystem { event_pump }
    }

    /// Drain pending SDL events. Call once per frame, before `poll`.
    pub fn poll_events(&mut self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(GameAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(action) = action_for_key(key) {
                        actions.push(action);
                    }
                }
                _ => {}
            }
        }

        actions
    }
}

fn action_for_key(key: Keycode) -> Option<GameAction> {
    match key {
        Keycode::Escape => Some(GameAction::Quit),
        Keycode::F1 => Some(GameAction::ToggleDebugPhysics),
        _ => None,
    }
}

impl InputSource for InputSystem {
    fn poll(&mut self) -> InputState {
        let keyboard = self.event_pump.keyboard_state();
        let mouse = self.event_pump.mouse_state();

        InputState {
            activate_key: keyboard.is_scancode_pressed(Scancode::Up)
                || keyboard.is_scancode_pressed(Scancode::Space),
            pointer_down: mouse.left(),
        }
    }
}
