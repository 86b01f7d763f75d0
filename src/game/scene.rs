// Scene controller: wires up entities and drives the per-frame update
//
// Frame order:
// 1. physics step (no-op once paused) and contact callbacks
// 2. obstacles scroll, then player update (skipped once the game is over)
// 3. player animation clock

use crate::animation::AnimationState;
use crate::collision::{Aabb, ContactKind};
use crate::config::{GameConfig, SceneVariant};
use crate::error::ConfigError;
use crate::input::InputState;
use crate::obstacle::{ObstacleKind, ObstaclePool, PoolLayout};
use crate::physics::{ArcadeWorld, BodyDesc, BodyHandle, Contact, PairId, PhysicsBackend};
use crate::player::{Player, PlayerMotion};

use super::events::{SceneEvent, SoundKey};
use super::state::GameState;

/// Tint applied to the player when a wall ends the run
pub const GAME_OVER_TINT: u32 = 0xff0000;

/// Tiled background scrolled a fixed step per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub enabled: bool,
    pub tile_offset_x: f32,
}

impl Background {
    const STEP_PER_FRAME: f32 = 1.0;

    fn advance(&mut self) {
        if self.enabled {
            self.tile_offset_x += Self::STEP_PER_FRAME;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Pairs whose contacts trigger a callback.
struct Pairs {
    stars: Option<PairId>,
    walls: PairId,
}

pub struct Scene<P: PhysicsBackend = ArcadeWorld> {
    config: GameConfig,
    physics: P,
    state: GameState,
    player: Player,
    ground: BodyHandle,
    stars: ObstaclePool,
    walls: ObstaclePool,
    background: Background,
    score_label: TextLabel,
    pairs: Pairs,
    events: Vec<SceneEvent>,
    frame_count: u64,
}

impl Scene<ArcadeWorld> {
    /// Build a scene on the bundled arcade physics world.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let physics = ArcadeWorld::new(config.physics.gravity_y);
        Scene::initialize(config, physics)
    }
}

impl<P: PhysicsBackend> Scene<P> {
    /// Place ground, player, both obstacle pools and the score label, and
    /// register the collision pairs:
    /// player/ground solid, player/stars overlap, player/walls solid.
    pub fn initialize(config: GameConfig, mut physics: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let variant = config.variant;

        let g = &config.ground;
        let ground = physics.add_body(BodyDesc::fixed(Aabb::from_center(
            g.center_x,
            g.center_y,
            g.width * g.scale,
            g.height * g.scale,
        )));

        let player = Player::spawn(&mut physics, &config.player, &config.animations);

        let o = &config.obstacles;
        let stars = ObstaclePool::spawn(
            &mut physics,
            PoolLayout {
                kind: ObstacleKind::Star,
                first_x: o.star_start_x,
                center_y: o.star_y,
                spacing: o.spacing,
                pool_size: o.pool_size,
                wrap_threshold: o.star_wrap_threshold,
                texture_size: (o.star_width, o.star_height),
                body_size: None,
                rotation: 0.0,
            },
        );
        let walls = ObstaclePool::spawn(
            &mut physics,
            PoolLayout {
                kind: ObstacleKind::Wall,
                first_x: o.star_start_x + variant.wall_x_offset,
                center_y: o.wall_y,
                spacing: o.spacing,
                pool_size: o.pool_size,
                wrap_threshold: o.wall_wrap_threshold,
                texture_size: (o.wall_texture_width, o.wall_texture_height),
                body_size: Some((o.wall_body_width, o.wall_body_height)),
                rotation: o.wall_rotation,
            },
        );

        // Ground contacts only block; grounded state is read back in update_player
        physics.add_collider(&[player.body()], &[ground]);
        let pairs = Pairs {
            stars: variant
                .star_overlap_enabled
                .then(|| register_pool(&mut physics, &player, &stars)),
            walls: register_pool(&mut physics, &player, &walls),
        };

        let score_label = TextLabel {
            x: config.score.label_x,
            y: config.score.label_y,
            text: config.score.initial_label.clone(),
        };

        log_variant(&variant);

        Ok(Scene {
            background: Background {
                enabled: variant.background_tile,
                tile_offset_x: 0.0,
            },
            config,
            physics,
            state: GameState::new(),
            player,
            ground,
            stars,
            walls,
            score_label,
            pairs,
            events: Vec::new(),
            frame_count: 0,
        })
    }

    /// Host callback for one rendered frame. Returns the events raised.
    pub fn frame(&mut self, delta_ms: f32, input: InputState) -> Vec<SceneEvent> {
        self.frame_count += 1;

        let contacts = self.physics.step(delta_ms);
        self.dispatch_contacts(&contacts);

        self.on_frame(delta_ms, input);
        self.player.animations_mut().update(delta_ms);

        std::mem::take(&mut self.events)
    }

    fn dispatch_contacts(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            // Nothing may change after the run has ended
            if self.state.game_over {
                break;
            }
            if Some(contact.pair) == self.pairs.stars {
                self.on_star_overlap(contact.b);
            } else if contact.pair == self.pairs.walls {
                self.on_wall_hit();
            }
        }
    }

    /// Per-frame game logic: obstacles first, then the player.
    pub fn on_frame(&mut self, delta_ms: f32, input: InputState) {
        if self.state.game_over {
            return;
        }
        self.move_obstacles(delta_ms);
        self.update_player(input);
    }

    fn move_obstacles(&mut self, delta_ms: f32) {
        let speed = self.config.obstacles.speed_multiplier;
        self.stars.advance(&mut self.physics, delta_ms, speed);
        self.walls.advance(&mut self.physics, delta_ms, speed);
        self.background.advance();
    }

    fn update_player(&mut self, input: InputState) {
        match self.player.motion(&self.physics) {
            PlayerMotion::Grounded => self.on_player_grounded_input(input),
            PlayerMotion::Rising | PlayerMotion::Falling => self.on_player_airborne(),
        }
    }

    /// Grounded: walk, clear the fall debounce, and jump if activate is held.
    /// Does nothing while airborne.
    pub fn on_player_grounded_input(&mut self, input: InputState) {
        if !self.player.is_grounded(&self.physics) {
            return;
        }

        self.player.animations_mut().play(AnimationState::Walk, true);
        self.state.falling = false;

        if input.activate_held() {
            let jump_velocity = self.config.player.jump_velocity;
            self.player.jump(&mut self.physics, jump_velocity);
            self.events.push(SceneEvent::PlaySound(SoundKey::Bounce));
            log::debug!("jump (frame {})", self.frame_count);
        }
    }

    /// Airborne: switch to the fall clip once per airborne period, as soon as
    /// the player starts descending.
    pub fn on_player_airborne(&mut self) {
        if self.player.motion(&self.physics) == PlayerMotion::Falling && !self.state.falling {
            let animations = self.player.animations_mut();
            animations.stop();
            animations.play(AnimationState::Fall, true);
            self.state.falling = true;
        }
    }

    /// Wall contact: freeze physics, stop the player's animation, tint the
    /// player and end the run. Disabled entirely by `wall_hit_enabled = false`.
    pub fn on_wall_hit(&mut self) {
        if !self.config.variant.wall_hit_enabled || self.state.game_over {
            return;
        }

        self.physics.pause();
        self.player.animations_mut().stop();
        self.player.tint = Some(GAME_OVER_TINT);
        self.state.end();

        log::info!("game over, final score {}", self.state.score);
        self.events.push(SceneEvent::GameOver {
            score: self.state.score,
        });
    }

    /// Star contact: take the star out of play and add the reward. A star that
    /// is already out never pays twice.
    pub fn on_star_overlap(&mut self, star: BodyHandle) {
        if !self.config.variant.star_overlap_enabled || self.state.game_over {
            return;
        }
        if !self.stars.deactivate(&mut self.physics, star) {
            return;
        }

        let score = self.state.award(self.config.score.reward);
        self.score_label.text = format!("{}{}", self.config.score.label_prefix, score);

        log::debug!("star collected, score {}", score);
        self.events.push(SceneEvent::StarCollected { score });
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn variant(&self) -> &SceneVariant {
        &self.config.variant
    }

    /// Runtime toggle for collision box drawing.
    pub fn toggle_debug_physics(&mut self) -> bool {
        self.config.variant.debug_physics = !self.config.variant.debug_physics;
        self.config.variant.debug_physics
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ground(&self) -> BodyHandle {
        self.ground
    }

    pub fn stars(&self) -> &ObstaclePool {
        &self.stars
    }

    pub fn walls(&self) -> &ObstaclePool {
        &self.walls
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn score_label(&self) -> &TextLabel {
        &self.score_label
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Pair the player with a pool, blocking or not depending on the pool's kind.
fn register_pool<P: PhysicsBackend>(physics: &mut P, player: &Player, pool: &ObstaclePool) -> PairId {
    match pool.kind().response() {
        ContactKind::Solid => physics.add_collider(&[player.body()], &pool.handles()),
        ContactKind::Overlap => physics.add_overlap(&[player.body()], &pool.handles()),
    }
}

fn log_variant(variant: &SceneVariant) {
    log::debug!(
        "scene variant: debug_physics={} background_tile={} wall_x_offset={} star_overlap={} wall_hit={}",
        variant.debug_physics,
        variant.background_tile,
        variant.wall_x_offset,
        variant.star_overlap_enabled,
        variant.wall_hit_enabled
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(GameConfig::default()).unwrap()
    }

    /// Run idle frames until the player has landed.
    fn settle(scene: &mut Scene) {
        for _ in 0..120 {
            scene.frame(16.0, InputState::idle());
            if scene.player().is_grounded(scene.physics()) {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_initialize_layout() {
        let scene = scene();

        assert_eq!(scene.stars().len(), 6);
        assert_eq!(scene.walls().len(), 6);
        assert_eq!(scene.score_label().text, "score: 0");
        assert_eq!(scene.state(), &GameState::new());

        let first_wall = scene.walls().handles()[0];
        let wall = scene.physics().body(first_wall).unwrap().bounds;
        assert_eq!(wall.center(), (550.0, 650.0));
        assert_eq!((wall.width, wall.height), (32.0, 400.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.obstacles.spacing = 0.0;
        assert!(Scene::new(config).is_err());
    }

    #[test]
    fn test_player_lands_and_walks() {
        let mut scene = scene();
        settle(&mut scene);
        scene.frame(16.0, InputState::idle());

        assert_eq!(
            scene.player().current_animation_state(),
            Some(AnimationState::Walk)
        );
        assert!(!scene.state().falling);
    }

    #[test]
    fn test_spawn_fall_triggers_debounce() {
        let mut scene = scene();
        // Spawned above the ground: first frames are a fall
        scene.frame(16.0, InputState::idle());
        scene.frame(16.0, InputState::idle());

        assert!(scene.state().falling);
        assert_eq!(
            scene.player().current_animation_state(),
            Some(AnimationState::Fall)
        );
    }

    #[test]
    fn test_jump_emits_bounce() {
        let mut scene = scene();
        settle(&mut scene);

        let events = scene.frame(16.0, InputState::key());

        assert!(events.contains(&SceneEvent::PlaySound(SoundKey::Bounce)));
        assert_eq!(
            scene.player().current_animation_state(),
            Some(AnimationState::Jump)
        );
        assert_eq!(scene.player().velocity(scene.physics()).1, -400.0);
    }

    #[test]
    fn test_rising_player_keeps_jump_clip() {
        let mut scene = scene();
        settle(&mut scene);
        scene.frame(16.0, InputState::key());

        for _ in 0..5 {
            scene.frame(16.0, InputState::idle());
            assert_eq!(scene.player().motion(scene.physics()), PlayerMotion::Rising);
        }
        assert!(!scene.state().falling);
        assert_eq!(
            scene.player().current_animation_state(),
            Some(AnimationState::Jump)
        );
    }

    #[test]
    fn test_register_pool_follows_obstacle_kind() {
        let config = GameConfig::default();
        let mut world = ArcadeWorld::new(0.0);
        let player = Player::spawn(&mut world, &config.player, &config.animations);
        let layout = PoolLayout {
            kind: ObstacleKind::Star,
            first_x: 100.0,
            center_y: 450.0,
            spacing: 500.0,
            pool_size: 1,
            wrap_threshold: -100.0,
            texture_size: (24.0, 22.0),
            body_size: None,
            rotation: 0.0,
        };
        let stars = ObstaclePool::spawn(&mut world, layout);
        let walls = ObstaclePool::spawn(
            &mut world,
            PoolLayout {
                kind: ObstacleKind::Wall,
                first_x: 2000.0,
                ..layout
            },
        );

        let star_pair = register_pool(&mut world, &player, &stars);
        let wall_pair = register_pool(&mut world, &player, &walls);
        let contacts = world.step(16.0);

        assert_ne!(star_pair, wall_pair);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].pair, star_pair);
        assert_eq!(contacts[0].kind, ContactKind::Overlap);
        // Overlaps never push the player
        assert_eq!(player.position(&world), (68.0, 396.0));
    }

    #[test]
    fn test_ground_contact_raises_no_events() {
        let mut config = GameConfig::default();
        config.obstacles.speed_multiplier = 0.0;
        let mut scene = Scene::new(config).unwrap();
        settle(&mut scene);

        // Standing still: only the ground pair reports contacts
        for _ in 0..10 {
            assert!(scene.frame(16.0, InputState::idle()).is_empty());
        }
        assert!(scene.player().is_grounded(scene.physics()));
    }

    #[test]
    fn test_grounded_handler_ignores_airborne_player() {
        let mut scene = scene();
        scene.on_player_grounded_input(InputState::pointer());
        assert_eq!(scene.player().velocity(scene.physics()).1, 0.0);
        assert!(scene.frame(16.0, InputState::idle()).is_empty());
    }

    #[test]
    fn test_star_overlap_scores_once() {
        let mut scene = scene();
        let star = scene.stars().handles()[0];

        scene.on_star_overlap(star);
        scene.on_star_overlap(star);

        assert_eq!(scene.score(), 10);
        assert_eq!(scene.score_label().text, "Score: 10");
        assert!(!scene.physics().is_enabled(star));
        assert_eq!(scene.stars().active_count(), 5);
    }

    #[test]
    fn test_wall_hit_ends_run() {
        let mut scene = scene();
        scene.on_wall_hit();

        assert!(scene.is_game_over());
        assert!(scene.physics().is_paused());
        assert_eq!(scene.player().tint, Some(GAME_OVER_TINT));
        assert!(!scene.player().animations().is_playing());
    }

    #[test]
    fn test_wall_hit_disabled_in_practice() {
        let config = GameConfig {
            variant: SceneVariant::practice(),
            ..GameConfig::default()
        };
        let mut scene = Scene::new(config).unwrap();

        scene.on_wall_hit();

        assert!(!scene.is_game_over());
        assert!(!scene.physics().is_paused());
        assert!(scene.player().tint.is_none());
    }

    #[test]
    fn test_star_overlap_disabled() {
        let mut config = GameConfig::default();
        config.variant.star_overlap_enabled = false;
        let mut scene = Scene::new(config).unwrap();
        let star = scene.stars().handles()[0];

        scene.on_star_overlap(star);

        assert_eq!(scene.score(), 0);
        assert!(scene.physics().is_enabled(star));
    }

    #[test]
    fn test_background_scrolls_one_pixel_per_frame() {
        let mut scene = scene();
        for _ in 0..5 {
            scene.frame(16.0, InputState::idle());
        }
        assert_eq!(scene.background().tile_offset_x, 5.0);
    }

    #[test]
    fn test_toggle_debug_physics() {
        let mut scene = scene();
        assert!(scene.toggle_debug_physics());
        assert!(!scene.toggle_debug_physics());
    }
}
