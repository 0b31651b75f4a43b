//! Audio system
//!
//! The simulation never plays sounds itself: it records `GameEvent`s and the
//! frame loop hands them to an `AudioManager`. Playback goes through an
//! `AudioBackend`, picked once at startup. When any sample file is missing the
//! game runs on the silent backend instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AudioError;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a wall or the paddle
    Bounce,
    /// Brick destroyed by a ball or laser
    BrickBreak,
    /// Last life lost
    GameOver,
    /// Laser pair fired
    Laser,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Bounce,
        SoundEffect::BrickBreak,
        SoundEffect::GameOver,
        SoundEffect::Laser,
    ];

    /// Asset file name inside the sound directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce.wav",
            SoundEffect::BrickBreak => "brick_break.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::Laser => "laser.wav",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BallBounced => Some(SoundEffect::Bounce),
            GameEvent::BrickDestroyed => Some(SoundEffect::BrickBreak),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            _ => None,
        }
    }
}

/// A request for the platform mixer
#[derive(Debug, Clone)]
pub struct Voice {
    pub effect: SoundEffect,
    pub volume: f32,
    /// Encoded sample data
    pub data: Arc<[u8]>,
}

/// Playback capability
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect);

    /// Volume in 0.0 - 1.0
    fn set_volume(&mut self, level: f32);

    /// Voices queued since the last drain, for the platform mixer
    fn drain_voices(&mut self) -> Vec<Voice> {
        Vec::new()
    }
}

/// No-op stand-in used when assets are unavailable
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, _effect: SoundEffect) {}

    fn set_volume(&mut self, _level: f32) {}
}

/// Sample-based playback: every effect's file loaded up front
#[derive(Debug)]
pub struct SampleBackend {
    samples: Vec<(SoundEffect, Arc<[u8]>)>,
    volume: f32,
    pending: Vec<Voice>,
}

impl SampleBackend {
    /// Load every effect from `dir`, failing on the first missing file
    pub fn load(dir: &Path) -> Result<Self, AudioError> {
        let samples = SoundEffect::ALL
            .iter()
            .map(|&effect| {
                let path: PathBuf = dir.join(effect.file_name());
                std::fs::read(&path)
                    .map(|bytes| (effect, Arc::<[u8]>::from(bytes)))
                    .map_err(|source| AudioError::MissingAsset { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            samples,
            volume: 1.0,
            pending: Vec::new(),
        })
    }
}

impl AudioBackend for SampleBackend {
    fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        if let Some((_, data)) = self.samples.iter().find(|(e, _)| *e == effect) {
            self.pending.push(Voice {
                effect,
                volume: self.volume,
                data: Arc::clone(data),
            });
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
    }

    fn drain_voices(&mut self) -> Vec<Voice> {
        std::mem::take(&mut self.pending)
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            muted: false,
        }
    }

    /// Pick the backend once, based on asset availability
    pub fn load(dir: &Path) -> Self {
        match SampleBackend::load(dir) {
            Ok(backend) => {
                log::info!("Loaded {} sound effects from {}", SoundEffect::ALL.len(), dir.display());
                Self::new(Box::new(backend))
            }
            Err(e) => {
                log::warn!("{} - audio disabled", e);
                Self::default()
            }
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.apply_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    fn apply_volume(&mut self) {
        let vol = self.effective_volume();
        self.backend.set_volume(vol);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.backend.play(effect);
    }

    /// React to one tick's worth of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::MuteToggled(muted) = event {
                self.set_muted(*muted);
            } else if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }

    pub fn drain_voices(&mut self) -> Vec<Voice> {
        self.backend.drain_voices()
    }
}
