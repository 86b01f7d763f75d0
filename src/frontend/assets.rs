//! Asset loading for the SDL frontend.
//!
//! Every key in the [`AssetManifest`] is resolved before the scene starts. A
//! missing image is fatal; missing audio only silences the game.

use crate::config::AssetManifest;
use crate::error::GameError;
use crate::game::{AudioSink, SoundKey};
use crate::sprite::SpriteSheet;
use sdl2::image::LoadTexture;
use sdl2::mixer::{Channel, Chunk};
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::collections::HashMap;

/// Loads a texture with an error that names the asset key.
fn load_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    manifest: &AssetManifest,
    key: &str,
    relative: &str,
) -> Result<Texture<'a>, GameError> {
    let path = manifest.resolve(relative);
    texture_creator
        .load_texture(&path)
        .map_err(|e| GameError::Asset {
            key: key.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
}

pub struct Assets<'a> {
    textures: HashMap<String, Texture<'a>>,
    /// Layout of the player's spritesheet
    pub frog_sheet: SpriteSheet,
}

impl<'a> Assets<'a> {
    pub fn load(
        texture_creator: &'a TextureCreator<WindowContext>,
        manifest: &AssetManifest,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, GameError> {
        let mut textures = HashMap::new();

        for (key, relative) in manifest.images.iter().chain(manifest.spritesheets.iter()) {
            let texture = load_texture(texture_creator, manifest, key, relative)?;
            log::debug!("loaded texture '{}'", key);
            textures.insert(key.clone(), texture);
        }

        let frog = textures.get("frog").ok_or_else(|| GameError::Asset {
            key: "frog".to_string(),
            reason: "not listed in the spritesheets table".to_string(),
        })?;
        let frog_sheet = SpriteSheet::for_texture(frame_width, frame_height, frog.query().width);

        Ok(Assets {
            textures,
            frog_sheet,
        })
    }

    pub fn texture(&self, key: &str) -> Option<&Texture<'a>> {
        self.textures.get(key)
    }

    pub fn texture_mut(&mut self, key: &str) -> Option<&mut Texture<'a>> {
        self.textures.get_mut(key)
    }
}

/// Mixer-backed audio. Sounds that failed to load are skipped quietly.
pub struct SdlAudio {
    chunks: HashMap<SoundKey, Chunk>,
}

impl SdlAudio {
    pub fn load(manifest: &AssetManifest) -> Self {
        let mut chunks = HashMap::new();

        for sound in [SoundKey::Bounce] {
            let Some(relative) = manifest.sounds.get(sound.asset_key()) else {
                log::warn!("no file listed for sound '{}'", sound.asset_key());
                continue;
            };
            let path = manifest.resolve(relative);
            match Chunk::from_file(&path) {
                Ok(chunk) => {
                    chunks.insert(sound, chunk);
                }
                Err(e) => log::warn!("could not load sound {}: {}", path.display(), e),
            }
        }

        SdlAudio { chunks }
    }

    /// Audio sink that plays nothing, for machines without a sound device.
    pub fn silent() -> Self {
        SdlAudio {
            chunks: HashMap::new(),
        }
    }
}

impl AudioSink for SdlAudio {
    fn play(&mut self, sound: SoundKey) {
        if let Some(chunk) = self.chunks.get(&sound) {
            if let Err(e) = Channel::all().play(chunk, 0) {
                log::debug!("sound '{}' dropped: {}", sound.asset_key(), e);
            }
        }
    }
}
