use crate::animation::{AnimationController, AnimationState, ClipConfig};
use crate::collision::Aabb;
use crate::config::PlayerConfig;
use crate::physics::{BodyDesc, BodyHandle, PhysicsBackend};
use std::collections::HashMap;

/// Vertical phase of the player, derived from the physics body each frame.
///
/// `Rising` and `Falling` only pick the animation; physically both are
/// just "not on the ground".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMotion {
    Grounded,
    Rising,
    Falling,
}

pub fn determine_motion(touching_down: bool, velocity_y: f32) -> PlayerMotion {
    if touching_down {
        PlayerMotion::Grounded
    } else if velocity_y > 0.0 {
        PlayerMotion::Falling
    } else {
        PlayerMotion::Rising
    }
}

pub struct Player {
    body: BodyHandle,
    pub frame_width: u32,
    pub frame_height: u32,
    pub scale: f32,
    /// RGB multiply colour; `None` draws the sprite untouched
    pub tint: Option<u32>,
    animation_controller: AnimationController,
}

impl Player {
    pub fn spawn<P: PhysicsBackend>(
        physics: &mut P,
        config: &PlayerConfig,
        clips: &HashMap<AnimationState, ClipConfig>,
    ) -> Self {
        let (width, height) = config.display_size();
        let bounds = Aabb::from_center(config.spawn_x, config.spawn_y, width, height);
        let body = physics.add_body(BodyDesc::dynamic(bounds));

        Player {
            body,
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            scale: config.scale,
            tint: None,
            animation_controller: AnimationController::from_config(clips),
        }
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn bounds<P: PhysicsBackend>(&self, physics: &P) -> Option<Aabb> {
        physics.body(self.body).map(|b| b.bounds)
    }

    pub fn position<P: PhysicsBackend>(&self, physics: &P) -> (f32, f32) {
        physics.position(self.body)
    }

    pub fn velocity<P: PhysicsBackend>(&self, physics: &P) -> (f32, f32) {
        physics.velocity(self.body)
    }

    pub fn is_grounded<P: PhysicsBackend>(&self, physics: &P) -> bool {
        physics.touching_down(self.body)
    }

    pub fn motion<P: PhysicsBackend>(&self, physics: &P) -> PlayerMotion {
        determine_motion(physics.touching_down(self.body), self.velocity(physics).1)
    }

    pub fn jump<P: PhysicsBackend>(&mut self, physics: &mut P, velocity_y: f32) {
        physics.set_velocity_y(self.body, velocity_y);
        self.animation_controller.play(AnimationState::Jump, true);
    }

    pub fn animations(&self) -> &AnimationController {
        &self.animation_controller
    }

    pub fn animations_mut(&mut self) -> &mut AnimationController {
        &mut self.animation_controller
    }

    pub fn current_animation_state(&self) -> Option<AnimationState> {
        self.animation_controller.current_state()
    }
}
