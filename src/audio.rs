//! Audio collaborator
//!
//! The simulation fires sounds and forgets them. `AudioManager` applies master
//! volume and mute, then queues requests for whatever backend drains them.

use crate::settings::Settings;

/// Sound samples the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Round (re)started
    Chime,
    /// Gust blowing toward -Y
    WindLow,
    /// Gust blowing sideways
    WindMid,
    /// Gust blowing toward +Y
    WindHigh,
}

impl Sample {
    /// File the backend loads this sample from
    pub fn file_name(&self) -> &'static str {
        match self {
            Sample::Chime => "chime.wav",
            Sample::WindLow => "wind_low.wav",
            Sample::WindMid => "wind_mid.wav",
            Sample::WindHigh => "wind_high.wav",
        }
    }
}

/// Where the simulation sends sounds
pub trait AudioSink {
    /// Start playing a sample. `pan` is -1 (left) to 1 (right).
    fn play(&mut self, sample: Sample, volume: f32, pan: f32);
    /// Stop everything currently playing
    fn stop_all(&mut self);
}

/// A queued playback request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRequest {
    pub sample: Sample,
    pub volume: f32,
    pub pan: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
    queue: Vec<PlayRequest>,
    /// Bumped on every `stop_all` so a backend can cut voices it started earlier
    generation: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            queue: Vec::new(),
            generation: 0,
        }
    }

    /// Audio manager honoring the volume and mute preferences
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Requests not yet handed to the backend
    pub fn pending(&self) -> &[PlayRequest] {
        &self.queue
    }

    /// Hand queued requests to the backend
    pub fn drain(&mut self) -> std::vec::Drain<'_, PlayRequest> {
        self.queue.drain(..)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, sample: Sample, volume: f32, pan: f32) {
        let volume = volume * self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::trace!("play {} vol {:.2} pan {:.1}", sample.file_name(), volume, pan);
        self.queue.push(PlayRequest {
            sample,
            volume,
            pan: pan.clamp(-1.0, 1.0),
        });
    }

    fn stop_all(&mut self) {
        self.queue.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
