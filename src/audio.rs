//! Audio cues
//!
//! The stage only asks for cues; actual playback belongs to the platform.
//! `AudioManager` applies the volume settings and queues what should be
//! heard until the platform drains it.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A push started
    Move,
    /// A gremlin started transforming
    Transform,
}

impl SoundEffect {
    /// Sample asset name
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Move => "move",
            SoundEffect::Transform => "transform",
        }
    }
}

/// Anything that can play a sample
pub trait AudioSink {
    fn play_sample(&mut self, effect: SoundEffect, volume: f32);
}

/// A cue waiting for the platform to play it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedSound {
    pub effect: SoundEffect,
    /// Final volume, settings already applied
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    pending: Vec<QueuedSound>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pending: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Take every queued cue, oldest first
    pub fn drain(&mut self) -> Vec<QueuedSound> {
        std::mem::take(&mut self.pending)
    }
}

impl AudioSink for AudioManager {
    fn play_sample(&mut self, effect: SoundEffect, volume: f32) {
        let vol = self.effective_volume() * volume;
        if vol <= 0.0 {
            return;
        }
        log::debug!("Cue {} at {:.2}", effect.asset_name(), vol);
        self.pending.push(QueuedSound { effect, volume: vol });
    }
}
