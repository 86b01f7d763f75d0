use crate::sprite::{generate_frames, Frame};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Player animation clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    Walk,
    Jump,
    Fall,
}

impl AnimationState {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationState::Walk => "walk",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
        }
    }
}

/// Clip definition as it appears in the config file.
///
/// `repeat` counts extra plays after the first; `-1` loops forever.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipConfig {
    pub start: u32,
    pub end: u32,
    pub frame_rate: f32,
    #[serde(default)]
    pub repeat: i32,
}

impl ClipConfig {
    pub fn new(start: u32, end: u32, frame_rate: f32, repeat: i32) -> Self {
        ClipConfig {
            start,
            end,
            frame_rate,
            repeat,
        }
    }

    pub fn loops_forever(&self) -> bool {
        self.repeat < 0
    }
}

/// The frog's clips: walk cycle, jump, and a single fall frame.
pub fn default_clips() -> HashMap<AnimationState, ClipConfig> {
    HashMap::from([
        (AnimationState::Walk, ClipConfig::new(0, 3, 10.0, -1)),
        (AnimationState::Jump, ClipConfig::new(1, 5, 20.0, 0)),
        (AnimationState::Fall, ClipConfig::new(6, 6, 5.0, 0)),
    ])
}

#[derive(Debug, Clone)]
struct Clip {
    frames: Vec<Frame>,
    repeat: i32,
}

/// Per-entity clip playback.
///
/// Frame advance is driven by the frame delta passed to `update`, so playback
/// freezes whenever the owner stops calling it.
#[derive(Debug, Clone)]
pub struct AnimationController {
    clips: HashMap<AnimationState, Clip>,
    current_state: Option<AnimationState>,
    current_frame: usize,
    frame_elapsed_ms: f32,
    repeats_done: i32,
    is_playing: bool,
}

impl AnimationController {
    pub fn new() -> Self {
        AnimationController {
            clips: HashMap::new(),
            current_state: None,
            current_frame: 0,
            frame_elapsed_ms: 0.0,
            repeats_done: 0,
            is_playing: false,
        }
    }

    pub fn from_config(clips: &HashMap<AnimationState, ClipConfig>) -> Self {
        let mut controller = AnimationController::new();
        for (state, clip) in clips {
            controller.add_animation(*state, *clip);
        }
        controller
    }

    pub fn add_animation(&mut self, state: AnimationState, config: ClipConfig) {
        let clip = Clip {
            frames: generate_frames(config.start, config.end, config.frame_rate),
            repeat: config.repeat,
        };
        self.clips.insert(state, clip);
    }

    /// Start `state` from its first frame.
    ///
    /// With `ignore_if_playing`, a request for the clip that is already
    /// running is a no-op. Returns whether playback (re)started.
    pub fn play(&mut self, state: AnimationState, ignore_if_playing: bool) -> bool {
        if ignore_if_playing && self.is_playing && self.current_state == Some(state) {
            return false;
        }
        if !self.clips.contains_key(&state) {
            log::warn!("no clip registered for animation '{}'", state.name());
            return false;
        }

        self.current_state = Some(state);
        self.current_frame = 0;
        self.frame_elapsed_ms = 0.0;
        self.repeats_done = 0;
        self.is_playing = true;
        true
    }

    /// Freeze on the current frame.
    pub fn stop(&mut self) {
        self.is_playing = false;
    }

    pub fn update(&mut self, delta_ms: f32) {
        if !self.is_playing {
            return;
        }
        let Some(clip) = self.current_state.and_then(|s| self.clips.get(&s)) else {
            return;
        };
        if clip.frames.is_empty() {
            self.is_playing = false;
            return;
        }

        self.frame_elapsed_ms += delta_ms;
        loop {
            let duration_ms = clip.frames[self.current_frame].duration_ms;
            if !(duration_ms > 0.0) || self.frame_elapsed_ms < duration_ms {
                break;
            }
            let remaining = self.frame_elapsed_ms - duration_ms;
            // Frames too short to register in f32 would never run the clock down
            if remaining >= self.frame_elapsed_ms {
                self.frame_elapsed_ms = 0.0;
                break;
            }
            self.frame_elapsed_ms = remaining;

            if self.current_frame + 1 < clip.frames.len() {
                self.current_frame += 1;
            } else if clip.repeat < 0 || self.repeats_done < clip.repeat {
                self.repeats_done += 1;
                self.current_frame = 0;
            } else {
                self.is_playing = false;
                self.frame_elapsed_ms = 0.0;
                break;
            }
        }
    }

    pub fn current_state(&self) -> Option<AnimationState> {
        self.current_state
    }

    /// Sheet index of the frame on display.
    pub fn current_frame(&self) -> Option<u32> {
        let clip = self.clips.get(&self.current_state?)?;
        clip.frames.get(self.current_frame).map(|frame| frame.index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_animation_finished(&self) -> bool {
        match self.current_state.and_then(|s| self.clips.get(&s)) {
            Some(clip) => {
                !self.is_playing
                    && clip.repeat >= 0
                    && self.current_frame + 1 == clip.frames.len()
            }
            None => false,
        }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        AnimationController::new()
    }
}
