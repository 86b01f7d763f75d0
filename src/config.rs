//! Game configuration.
//!
//! Everything tunable lives in [`GameConfig`], loaded from JSON. Every field
//! has a default, so a config file only needs the values it changes.
//!
//! # Lookup order
//!
//! 1. A path given on the command line
//! 2. `./frog_runner.json`
//! 3. `<platform config dir>/frog_runner/config.json`
//! 4. Built-in defaults

use crate::animation::{default_clips, AnimationState, ClipConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = "frog_runner.json";

/// Switches that used to distinguish separately maintained builds of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneVariant {
    /// Draw collision boxes over the scene
    pub debug_physics: bool,
    /// Scrolling tiled background behind the level
    pub background_tile: bool,
    /// Horizontal distance from the first star to the first wall
    pub wall_x_offset: f32,
    /// Stars can be collected
    pub star_overlap_enabled: bool,
    /// Touching a wall ends the run
    pub wall_hit_enabled: bool,
}

impl SceneVariant {
    /// The regular game.
    pub fn classic() -> Self {
        SceneVariant {
            debug_physics: false,
            background_tile: true,
            wall_x_offset: 350.0,
            star_overlap_enabled: true,
            wall_hit_enabled: true,
        }
    }

    /// Debug build: collision boxes on, no background, walls cannot end the run.
    pub fn practice() -> Self {
        SceneVariant {
            debug_physics: true,
            background_tile: false,
            wall_hit_enabled: false,
            ..SceneVariant::classic()
        }
    }
}

impl Default for SceneVariant {
    fn default() -> Self {
        SceneVariant::classic()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: "Frog Runner".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// px/s², positive pulls down
    pub gravity_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig { gravity_y: 450.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub scale: f32,
    /// Vertical velocity applied on jump, px/s (negative is up)
    pub jump_velocity: f32,
}

impl PlayerConfig {
    pub fn display_size(&self) -> (f32, f32) {
        (
            self.frame_width as f32 * self.scale,
            self.frame_height as f32 * self.scale,
        )
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            spawn_x: 100.0,
            spawn_y: 450.0,
            frame_width: 16,
            frame_height: 27,
            scale: 4.0,
            jump_velocity: -400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        GroundConfig {
            center_x: 400.0,
            center_y: 568.0,
            width: 400.0,
            height: 32.0,
            scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Entities per pool
    pub pool_size: usize,
    /// Horizontal distance between neighbours in a pool
    pub spacing: f32,
    /// Scroll speed in px per millisecond of frame time
    pub speed_multiplier: f32,
    pub star_start_x: f32,
    pub star_y: f32,
    pub star_width: f32,
    pub star_height: f32,
    pub star_wrap_threshold: f32,
    pub wall_y: f32,
    /// Texture size before rotation
    pub wall_texture_width: f32,
    pub wall_texture_height: f32,
    /// Collision extent after rotation
    pub wall_body_width: f32,
    pub wall_body_height: f32,
    pub wall_rotation: f32,
    pub wall_wrap_threshold: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        ObstacleConfig {
            pool_size: 6,
            spacing: 500.0,
            speed_multiplier: 0.4,
            star_start_x: 200.0,
            star_y: 500.0,
            star_width: 24.0,
            star_height: 22.0,
            star_wrap_threshold: -100.0,
            wall_y: 650.0,
            wall_texture_width: 400.0,
            wall_texture_height: 32.0,
            wall_body_width: 32.0,
            wall_body_height: 400.0,
            wall_rotation: std::f32::consts::FRAC_PI_2,
            wall_wrap_threshold: -300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub reward: u32,
    pub label_x: i32,
    pub label_y: i32,
    pub initial_label: String,
    pub label_prefix: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            reward: 10,
            label_x: 16,
            label_y: 16,
            initial_label: "score: 0".to_string(),
            label_prefix: "Score: ".to_string(),
        }
    }
}

/// Named assets, resolved relative to `base_dir` before the scene starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub base_dir: PathBuf,
    pub images: BTreeMap<String, String>,
    pub spritesheets: BTreeMap<String, String>,
    pub sounds: BTreeMap<String, String>,
}

impl AssetManifest {
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        let images = [
            ("background", "scifi_bg.jpg"),
            ("sky", "sky.png"),
            ("ground", "platform.png"),
            ("wall", "platform.png"),
            ("star", "star.png"),
        ];
        AssetManifest {
            base_dir: PathBuf::from("assets"),
            images: images
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            spritesheets: BTreeMap::from([("frog".to_string(), "frog.png".to_string())]),
            sounds: BTreeMap::from([("bounce".to_string(), "bounce.ogg".to_string())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub ground: GroundConfig,
    pub obstacles: ObstacleConfig,
    pub score: ScoreConfig,
    pub animations: HashMap<AnimationState, ClipConfig>,
    pub variant: SceneVariant,
    pub assets: AssetManifest,
    /// `env_logger` filter, e.g. "frog_runner=debug"
    pub log_filter: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            window: WindowConfig::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            ground: GroundConfig::default(),
            obstacles: ObstacleConfig::default(),
            score: ScoreConfig::default(),
            animations: default_clips(),
            variant: SceneVariant::default(),
            assets: AssetManifest::default(),
            log_filter: None,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("frog_runner").join("config.json"));
        }
        paths
    }

    /// Load the explicit path if given (errors are fatal), otherwise the first
    /// usable file from [`GameConfig::search_paths`], otherwise defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return Ok((config, ConfigSource::File(path))),
                Err(e) => {
                    log::warn!("ignoring config {}: {}", path.display(), e);
                }
            }
        }

        Ok((GameConfig::default(), ConfigSource::Defaults))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_finite()?;

        let obstacles = &self.obstacles;
        if obstacles.pool_size == 0 {
            return Err(invalid("obstacles.pool_size must be greater than 0"));
        }
        if obstacles.spacing <= 0.0 {
            return Err(invalid("obstacles.spacing must be positive"));
        }
        if obstacles.speed_multiplier < 0.0 {
            return Err(invalid("obstacles.speed_multiplier must not be negative"));
        }
        if obstacles.star_wrap_threshold >= 0.0 || obstacles.wall_wrap_threshold >= 0.0 {
            return Err(invalid("wrap thresholds must be left of the screen (negative)"));
        }
        let sizes = [
            obstacles.star_width,
            obstacles.star_height,
            obstacles.wall_texture_width,
            obstacles.wall_texture_height,
            obstacles.wall_body_width,
            obstacles.wall_body_height,
            self.ground.width,
            self.ground.height,
        ];
        if sizes.iter().any(|&size| size <= 0.0) {
            return Err(invalid("obstacle and ground sizes must be positive"));
        }
        if self.player.scale <= 0.0 || self.ground.scale <= 0.0 {
            return Err(invalid("scales must be positive"));
        }
        if self.player.frame_width == 0 || self.player.frame_height == 0 {
            return Err(invalid("player frame size must be non-zero"));
        }
        for (state, clip) in &self.animations {
            validate_clip(state.name(), clip)?;
        }
        Ok(())
    }

    /// NaN and infinities slip past every range check, so reject them first.
    fn validate_finite(&self) -> Result<(), ConfigError> {
        let o = &self.obstacles;
        let p = &self.player;
        let g = &self.ground;
        let fields = [
            ("physics.gravity_y", self.physics.gravity_y),
            ("player.spawn_x", p.spawn_x),
            ("player.spawn_y", p.spawn_y),
            ("player.scale", p.scale),
            ("player.jump_velocity", p.jump_velocity),
            ("ground.center_x", g.center_x),
            ("ground.center_y", g.center_y),
            ("ground.width", g.width),
            ("ground.height", g.height),
            ("ground.scale", g.scale),
            ("obstacles.spacing", o.spacing),
            ("obstacles.speed_multiplier", o.speed_multiplier),
            ("obstacles.star_start_x", o.star_start_x),
            ("obstacles.star_y", o.star_y),
            ("obstacles.star_width", o.star_width),
            ("obstacles.star_height", o.star_height),
            ("obstacles.star_wrap_threshold", o.star_wrap_threshold),
            ("obstacles.wall_y", o.wall_y),
            ("obstacles.wall_texture_width", o.wall_texture_width),
            ("obstacles.wall_texture_height", o.wall_texture_height),
            ("obstacles.wall_body_width", o.wall_body_width),
            ("obstacles.wall_body_height", o.wall_body_height),
            ("obstacles.wall_rotation", o.wall_rotation),
            ("obstacles.wall_wrap_threshold", o.wall_wrap_threshold),
            ("variant.wall_x_offset", self.variant.wall_x_offset),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(invalid(&format!("{} must be a finite number", name))),
            None => Ok(()),
        }
    }

    /// Distance an obstacle jumps when it wraps: one full pool width.
    pub fn wrap_distance(&self) -> f32 {
        self.obstacles.pool_size as f32 * self.obstacles.spacing
    }
}

/// Faster clips would need several frames per millisecond.
pub const MAX_FRAME_RATE: f32 = 1000.0;
/// Highest spritesheet cell a clip may reference.
pub const MAX_SHEET_FRAME: u32 = 1023;

fn validate_clip(name: &str, clip: &ClipConfig) -> Result<(), ConfigError> {
    if clip.end < clip.start {
        return Err(invalid(&format!(
            "animation '{}' has end frame before start frame",
            name
        )));
    }
    if clip.end > MAX_SHEET_FRAME {
        return Err(invalid(&format!(
            "animation '{}' ends past frame {}",
            name, MAX_SHEET_FRAME
        )));
    }
    if !(clip.frame_rate > 0.0 && clip.frame_rate <= MAX_FRAME_RATE) {
        return Err(invalid(&format!(
            "animation '{}' needs a frame rate in (0, {}]",
            name, MAX_FRAME_RATE
        )));
    }
    Ok(())
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wrap_distance(), 3000.0);
        assert_eq!(config.player.display_size(), (64.0, 108.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(
            r#"{ "obstacles": { "speed_multiplier": 0.8 }, "variant": { "wall_hit_enabled": false } }"#,
        )
        .unwrap();

        assert_eq!(config.obstacles.speed_multiplier, 0.8);
        assert_eq!(config.obstacles.spacing, 500.0);
        assert!(!config.variant.wall_hit_enabled);
        assert!(config.variant.background_tile);
        assert_eq!(config.animations.len(), 3);
    }

    #[test]
    fn test_rejects_empty_pool() {
        let err = GameConfig::from_json(r#"{ "obstacles": { "pool_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_positive_wrap_threshold() {
        let mut config = GameConfig::default();
        config.obstacles.wall_wrap_threshold = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_clip() {
        let mut config = GameConfig::default();
        config
            .animations
            .insert(AnimationState::Jump, ClipConfig::new(5, 1, 20.0, 0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn test_rejects_clip_frame_rate_out_of_range() {
        for rate in ["1e12", "1e39", "0.0"] {
            let json = format!(
                r#"{{ "animations": {{ "walk": {{ "start": 0, "end": 3, "frame_rate": {}, "repeat": -1 }} }} }}"#,
                rate
            );
            assert!(GameConfig::from_json(&json).is_err(), "frame_rate {} accepted", rate);
        }

        let mut config = GameConfig::default();
        config
            .animations
            .insert(AnimationState::Walk, ClipConfig::new(0, 3, MAX_FRAME_RATE, -1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_clip_past_last_sheet_frame() {
        let err = GameConfig::from_json(
            r#"{ "animations": { "fall": { "start": 6, "end": 4294967295, "frame_rate": 5.0 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("fall"));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut config = GameConfig::default();
        config.obstacles.speed_multiplier = f32::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("speed_multiplier"));

        let mut config = GameConfig::default();
        config.physics.gravity_y = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.variant.wall_x_offset = f32::NEG_INFINITY;
        assert!(config.validate().is_err());

        assert!(GameConfig::from_json(r#"{ "obstacles": { "speed_multiplier": 1e39 } }"#).is_err());
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let mut config = GameConfig::default();
        config.obstacles.wall_body_height = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.ground.width = -400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_variant_presets_differ() {
        let classic = SceneVariant::classic();
        let practice = SceneVariant::practice();

        assert!(classic.wall_hit_enabled);
        assert!(!practice.wall_hit_enabled);
        assert!(practice.debug_physics);
        assert!(!practice.background_tile);
        assert_eq!(classic.wall_x_offset, practice.wall_x_offset);
        assert!(practice.star_overlap_enabled);
    }

    #[test]
    fn test_asset_manifest_resolves_relative_paths() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.images["wall"], manifest.images["ground"]);
        assert_eq!(manifest.resolve("star.png"), PathBuf::from("assets").join("star.png"));
    }

    #[test]
    fn test_discover_missing_explicit_path_is_io_error() {
        let missing = std::env::temp_dir().join("frog_runner_no_such_config.json");
        let err = GameConfig::discover(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
