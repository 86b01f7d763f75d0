// Events raised by the scene during a frame, for the host to act on

/// Named sound clips the scene can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKey {
    Bounce,
}

impl SoundKey {
    /// Asset key in the manifest
    pub fn asset_key(&self) -> &'static str {
        match self {
            SoundKey::Bounce => "bounce",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    PlaySound(SoundKey),
    StarCollected { score: u32 },
    GameOver { score: u32 },
}

/// Audio collaborator: plays a named clip, fire and forget.
pub trait AudioSink {
    fn play(&mut self, sound: SoundKey);
}

/// Forward every sound request in `events` to `sink`.
pub fn dispatch_sounds(events: &[SceneEvent], sink: &mut impl AudioSink) -> usize {
    let mut played = 0;
    for event in events {
        if let SceneEvent::PlaySound(sound) = event {
            sink.play(*sound);
            played += 1;
        }
    }
    played
}
