// Headless runs of the full scene: physics, obstacles, scoring and game over
// driven frame by frame the way the desktop frontend drives them.

use frog_runner::animation::AnimationState;
use frog_runner::game::{SoundKey, GAME_OVER_TINT};
use frog_runner::input::{InputSource, InputState, ScriptedInput};
use frog_runner::physics::{BodyHandle, PhysicsBackend};
use frog_runner::{GameConfig, Scene, SceneEvent, SceneVariant};

const FRAME_MS: f32 = 16.0;

fn center_x(scene: &Scene, body: BodyHandle) -> f32 {
    scene.physics().body(body).unwrap().bounds.center().0
}

fn run_idle(scene: &mut Scene, frames: usize) -> Vec<SceneEvent> {
    (0..frames)
        .flat_map(|_| scene.frame(FRAME_MS, InputState::idle()))
        .collect()
}

/// Frames until the player first stands on the ground.
fn settle(scene: &mut Scene) {
    for _ in 0..120 {
        scene.frame(FRAME_MS, InputState::idle());
        if scene.player().is_grounded(scene.physics()) {
            return;
        }
    }
    panic!("player never landed");
}

fn still_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.obstacles.speed_multiplier = 0.0;
    config
}

#[test]
fn test_obstacles_move_delta_times_speed_per_frame() {
    let mut scene = Scene::new(GameConfig::default()).unwrap();
    let star = scene.stars().handles()[1];
    let wall = scene.walls().handles()[1];
    let (star_before, wall_before) = (center_x(&scene, star), center_x(&scene, wall));

    scene.frame(FRAME_MS, InputState::idle());

    assert!((star_before - center_x(&scene, star) - 6.4).abs() < 1e-3);
    assert!((wall_before - center_x(&scene, wall) - 6.4).abs() < 1e-3);
}

#[test]
fn test_wall_wraps_one_pool_width_past_threshold() {
    // Walls cannot end a practice run, so the row scrolls indefinitely
    let config = GameConfig {
        variant: SceneVariant::practice(),
        ..GameConfig::default()
    };
    let mut scene = Scene::new(config).unwrap();
    let wall = scene.walls().handles()[0];
    assert_eq!(center_x(&scene, wall), 550.0);

    run_idle(&mut scene, 132);
    assert!((center_x(&scene, wall) - (-294.8)).abs() < 0.5);

    run_idle(&mut scene, 1);
    assert!((center_x(&scene, wall) - 2698.8).abs() < 0.5);
}

#[test]
fn test_wall_row_spacing_stays_uniform() {
    let config = GameConfig {
        variant: SceneVariant::practice(),
        ..GameConfig::default()
    };
    let mut scene = Scene::new(config).unwrap();

    run_idle(&mut scene, 1500);

    let mut xs: Vec<f32> = scene
        .walls()
        .handles()
        .into_iter()
        .map(|h| center_x(&scene, h))
        .collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for pair in xs.windows(2) {
        assert!((pair[1] - pair[0] - 500.0).abs() < 0.5, "spacing drifted: {:?}", xs);
    }
    assert!(xs[0] >= -300.0);
}

#[test]
fn test_idle_run_collects_first_star_then_hits_wall() {
    let mut scene = Scene::new(GameConfig::default()).unwrap();

    let mut events = Vec::new();
    for _ in 0..300 {
        events.extend(scene.frame(FRAME_MS, InputState::idle()));
        if scene.is_game_over() {
            break;
        }
    }

    assert!(scene.is_game_over());
    let scores: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SceneEvent::StarCollected { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(scores, vec![10]);
    assert_eq!(scene.score_label().text, "Score: 10");
    assert_eq!(
        events.last(),
        Some(&SceneEvent::GameOver { score: 10 })
    );
}

#[test]
fn test_nothing_changes_after_game_over() {
    let mut scene = Scene::new(GameConfig::default()).unwrap();
    while !scene.is_game_over() {
        scene.frame(FRAME_MS, InputState::idle());
        assert!(scene.frame_count() < 300, "run never ended");
    }

    let player_pos = scene.player().position(scene.physics());
    let star_xs: Vec<f32> = scene.stars().handles().into_iter().map(|h| center_x(&scene, h)).collect();
    let wall_xs: Vec<f32> = scene.walls().handles().into_iter().map(|h| center_x(&scene, h)).collect();
    let background = scene.background().tile_offset_x;
    let score = scene.score();

    let mut input = ScriptedInput::new(vec![InputState::key(); 30]);
    let mut events = Vec::new();
    for _ in 0..100 {
        events.extend(scene.frame(FRAME_MS, input.poll()));
    }

    assert!(events.is_empty());
    assert_eq!(scene.score(), score);
    assert_eq!(scene.player().position(scene.physics()), player_pos);
    assert_eq!(scene.player().tint, Some(GAME_OVER_TINT));
    assert!(!scene.player().animations().is_playing());
    assert_eq!(scene.background().tile_offset_x, background);
    let star_after: Vec<f32> = scene.stars().handles().into_iter().map(|h| center_x(&scene, h)).collect();
    let wall_after: Vec<f32> = scene.walls().handles().into_iter().map(|h| center_x(&scene, h)).collect();
    assert_eq!(star_after, star_xs);
    assert_eq!(wall_after, wall_xs);
}

#[test]
fn test_practice_run_never_ends() {
    let config = GameConfig {
        variant: SceneVariant::practice(),
        ..GameConfig::default()
    };
    let mut scene = Scene::new(config).unwrap();

    let events = run_idle(&mut scene, 600);

    assert!(!scene.is_game_over());
    assert!(!events.iter().any(|e| matches!(e, SceneEvent::GameOver { .. })));
    assert!(scene.player().tint.is_none());
}

#[test]
fn test_jump_then_single_fall_per_airborne_period() {
    let mut scene = Scene::new(still_config()).unwrap();
    settle(&mut scene);
    scene.frame(FRAME_MS, InputState::idle());
    assert!(!scene.state().falling);

    let mut input = ScriptedInput::new([InputState::pointer()]);
    let events = scene.frame(FRAME_MS, input.poll());
    assert_eq!(events, vec![SceneEvent::PlaySound(SoundKey::Bounce)]);
    assert_eq!(
        scene.player().current_animation_state(),
        Some(AnimationState::Jump)
    );

    let mut fall_starts = 0;
    let mut was_falling = scene.state().falling;
    let mut landed = false;
    for _ in 0..300 {
        scene.frame(FRAME_MS, input.poll());
        let falling = scene.state().falling;
        if falling && !was_falling {
            fall_starts += 1;
            assert_eq!(
                scene.player().current_animation_state(),
                Some(AnimationState::Fall)
            );
        }
        was_falling = falling;
        if scene.player().is_grounded(scene.physics()) && fall_starts > 0 {
            landed = true;
            break;
        }
    }

    assert!(landed, "player never came back down");
    assert_eq!(fall_starts, 1);

    // Landing clears the debounce and resumes walking
    scene.frame(FRAME_MS, InputState::idle());
    assert!(!scene.state().falling);
    assert_eq!(
        scene.player().current_animation_state(),
        Some(AnimationState::Walk)
    );
}

#[test]
fn test_holding_activate_jumps_again_after_landing() {
    let mut scene = Scene::new(still_config()).unwrap();
    settle(&mut scene);

    let bounces = (0..400)
        .flat_map(|_| scene.frame(FRAME_MS, InputState::key()))
        .filter(|e| *e == SceneEvent::PlaySound(SoundKey::Bounce))
        .count();

    // Each jump stays airborne for roughly 110 frames
    assert!((2..=5).contains(&bounces), "bounces: {}", bounces);
}
