//! SDL2 desktop frontend.
//!
//! Plays the role of the host engine: owns the window, loads assets before
//! the scene starts, feeds the scene one frame at a time with the elapsed
//! time and input, plays the sounds it asks for, and draws the result.

pub mod assets;
pub mod input;
pub mod render;
pub mod text;

use crate::clock::{frame_budget_remaining, FrameClock};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{dispatch_sounds, Scene, SceneEvent};
use crate::input::InputSource;
use assets::{Assets, SdlAudio};
use input::{GameAction, InputSystem};
use std::time::Instant;

/// Keeps the audio subsystem and mixer alive for the length of the run.
struct AudioContext {
    _audio: sdl2::AudioSubsystem,
    _mixer: sdl2::mixer::Sdl2MixerContext,
}

/// Open the mixer; on failure the game runs silent.
fn open_audio(sdl_context: &sdl2::Sdl, config: &GameConfig) -> (Option<AudioContext>, SdlAudio) {
    let opened = sdl_context.audio().and_then(|audio| {
        sdl2::mixer::open_audio(44_100, sdl2::mixer::DEFAULT_FORMAT, 2, 1024)?;
        sdl2::mixer::allocate_channels(4);
        let mixer = sdl2::mixer::init(sdl2::mixer::InitFlag::OGG)?;
        Ok(AudioContext {
            _audio: audio,
            _mixer: mixer,
        })
    });

    match opened {
        Ok(context) => (Some(context), SdlAudio::load(&config.assets)),
        Err(e) => {
            log::warn!("audio unavailable, continuing without sound: {}", e);
            (None, SdlAudio::silent())
        }
    }
}

fn log_events(events: &[SceneEvent]) {
    for event in events {
        match event {
            SceneEvent::StarCollected { score } => log::debug!("score: {}", score),
            SceneEvent::GameOver { score } => {
                log::info!("Game over! Final score: {} (Esc to quit)", score)
            }
            SceneEvent::PlaySound(_) => {}
        }
    }
}

pub fn run(config: GameConfig) -> Result<(), GameError> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context =
        sdl2::image::init(sdl2::image::InitFlag::PNG | sdl2::image::InitFlag::JPG)?;
    let (_audio_context, mut audio) = open_audio(&sdl_context, &config);

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .build()
        .map_err(|e| GameError::Platform(e.to_string()))?;

    let mut canvas = window
        .into_canvas()
        .build()
        .map_err(|e| GameError::Platform(e.to_string()))?;
    canvas
        .set_logical_size(config.window.width, config.window.height)
        .map_err(|e| GameError::Platform(e.to_string()))?;

    let texture_creator = canvas.texture_creator();
    let mut assets = Assets::load(
        &texture_creator,
        &config.assets,
        config.player.frame_width,
        config.player.frame_height,
    )?;

    let mut input = InputSystem::new(sdl_context.event_pump()?);
    let target_fps = config.window.target_fps;
    let mut scene = Scene::new(config)?;

    log::info!("Controls: Up/Space or click to jump, F1 collision boxes, Esc to quit");

    let mut clock = FrameClock::new();
    'running: loop {
        let frame_start = Instant::now();

        for action in input.poll_events() {
            match action {
                GameAction::Quit => break 'running,
                GameAction::ToggleDebugPhysics => {
                    let on = scene.toggle_debug_physics();
                    log::info!("Collision boxes: {}", if on { "ON" } else { "OFF" });
                }
            }
        }

        let delta_ms = clock.tick();
        let events = scene.frame(delta_ms, input.poll());
        dispatch_sounds(&events, &mut audio);
        log_events(&events);

        render::render_scene(&mut canvas, &mut assets, &scene)?;
        canvas.present();

        if let Some(remaining) = frame_budget_remaining(frame_start, target_fps) {
            std::thread::sleep(remaining);
        }
    }

    log::info!("Final score: {}", scene.score());
    Ok(())
}
