/// Scene rendering for the SDL frontend
///
/// Draws back to front in fixed layers; nothing here mutates game state.
///
/// # Layers
///
/// 1. Sky backdrop, then the scrolling background tile (if enabled)
/// 2. Ground
/// 3. Stars still in play, then walls (texture rotated upright)
/// 4. Player frame, tinted after a wall hit
/// 5. Score label
/// 6. Collision boxes when `debug_physics` is on
use super::assets::Assets;
use super::text::draw_label;
use crate::collision::Aabb;
use crate::game::Scene;
use crate::obstacle::ObstaclePool;
use crate::physics::{ArcadeWorld, BodyKind, PhysicsBackend};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const SCORE_COLOR: Color = Color::RGB(0, 0, 0);
/// 5x7 glyphs at 4x come out close to a 32px font
const SCORE_SCALE: u32 = 4;
const DEBUG_BODY_COLOR: Color = Color::RGB(255, 0, 255);
const DEBUG_STATIC_COLOR: Color = Color::RGB(0, 0, 255);

fn to_rect(bounds: &Aabb) -> Rect {
    Rect::new(
        bounds.x.round() as i32,
        bounds.y.round() as i32,
        bounds.width.round().max(1.0) as u32,
        bounds.height.round().max(1.0) as u32,
    )
}

fn tint_rgb(tint: u32) -> (u8, u8, u8) {
    (
        ((tint >> 16) & 0xff) as u8,
        ((tint >> 8) & 0xff) as u8,
        (tint & 0xff) as u8,
    )
}

pub fn render_scene(
    canvas: &mut Canvas<Window>,
    assets: &mut Assets,
    scene: &Scene<ArcadeWorld>,
) -> Result<(), String> {
    canvas.set_draw_color(Color::RGB(0, 0, 0));
    canvas.clear();

    render_backdrop(canvas, assets, scene)?;

    let physics = scene.physics();
    if let (Some(texture), Some(body)) = (assets.texture("ground"), physics.body(scene.ground())) {
        canvas.copy(texture, None, Some(to_rect(&body.bounds)))?;
    }

    render_pool(canvas, assets, physics, scene.stars())?;
    render_pool(canvas, assets, physics, scene.walls())?;
    render_player(canvas, assets, scene)?;

    draw_label(canvas, scene.score_label(), SCORE_COLOR, SCORE_SCALE)?;

    if scene.variant().debug_physics {
        render_debug_bodies(canvas, physics)?;
    }

    Ok(())
}

fn render_backdrop(canvas: &mut Canvas<Window>, assets: &Assets, scene: &Scene<ArcadeWorld>) -> Result<(), String> {
    let (width, height) = canvas.output_size()?;

    if let Some(sky) = assets.texture("sky") {
        canvas.copy(sky, None, Some(Rect::new(0, 0, width, height)))?;
    }

    let background = scene.background();
    if !background.enabled {
        return Ok(());
    }
    let Some(texture) = assets.texture("background") else {
        return Ok(());
    };

    // Scaled to the window height, aspect ratio kept
    let query = texture.query();
    let scale = height as f32 / query.height.max(1) as f32;
    let tile_width = (query.width as f32 * scale).max(1.0);
    let shift = (background.tile_offset_x * scale) % tile_width;

    canvas.set_clip_rect(Rect::new(0, 0, tile_width as u32, height));
    let mut x = -shift;
    while x < tile_width {
        canvas.copy(texture, None, Some(Rect::new(x as i32, 0, tile_width as u32 + 1, height)))?;
        x += tile_width;
    }
    canvas.set_clip_rect(None);

    Ok(())
}

fn render_pool(
    canvas: &mut Canvas<Window>,
    assets: &Assets,
    physics: &ArcadeWorld,
    pool: &ObstaclePool,
) -> Result<(), String> {
    let Some(texture) = assets.texture(pool.kind().texture_key()) else {
        return Ok(());
    };
    let (texture_w, texture_h) = pool.texture_size();
    let angle = pool.rotation().to_degrees() as f64;

    for obstacle in pool.iter().filter(|o| o.active) {
        let Some(body) = physics.body(obstacle.body) else {
            continue;
        };
        // The body may be resized; draw the texture centred on it
        let (cx, cy) = body.bounds.center();
        let dest = to_rect(&Aabb::from_center(cx, cy, texture_w, texture_h));
        canvas.copy_ex(texture, None, Some(dest), angle, None, false, false)?;
    }

    Ok(())
}

fn render_player(canvas: &mut Canvas<Window>, assets: &mut Assets, scene: &Scene<ArcadeWorld>) -> Result<(), String> {
    let player = scene.player();
    let Some(bounds) = player.bounds(scene.physics()) else {
        return Ok(());
    };
    let frame = player.animations().current_frame().unwrap_or(0);
    let source = assets.frog_sheet.source_rect(frame);
    let src = Rect::new(source.x, source.y, source.width, source.height);

    let Some(texture) = assets.texture_mut("frog") else {
        canvas.set_draw_color(Color::RGB(0, 160, 0));
        return canvas.fill_rect(to_rect(&bounds));
    };

    let (r, g, b) = player.tint.map(tint_rgb).unwrap_or((255, 255, 255));
    texture.set_color_mod(r, g, b);
    canvas.copy(texture, Some(src), Some(to_rect(&bounds)))
}

fn render_debug_bodies(canvas: &mut Canvas<Window>, physics: &ArcadeWorld) -> Result<(), String> {
    for (_, body) in physics.bodies().filter(|(_, b)| b.enabled) {
        let color = match body.kind {
            BodyKind::Static => DEBUG_STATIC_COLOR,
            BodyKind::Dynamic => DEBUG_BODY_COLOR,
        };
        canvas.set_draw_color(color);
        canvas.draw_rect(to_rect(&body.bounds))?;
    }
    Ok(())
}
