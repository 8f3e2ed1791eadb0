//! Fire-and-forget sound cues
//!
//! The simulation only pushes `GameEvent`s; this module maps them to sound
//! effects and hands them to whatever backend is plugged in.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Wing flap
    Wing,
    /// Obstacle passed
    Point,
    /// Impact with ground or pipe
    Hit,
    /// Run over
    Die,
    /// Mode transition / event start and end
    Swoosh,
}

impl SoundEffect {
    /// Asset name the backend looks up
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Wing => "wing",
            SoundEffect::Point => "point",
            SoundEffect::Hit => "hit",
            SoundEffect::Die => "die",
            SoundEffect::Swoosh => "swoosh",
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundEffect::Wing),
            GameEvent::Scored { .. } => Some(SoundEffect::Point),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::Died(_) => Some(SoundEffect::Die),
            GameEvent::Swoosh => Some(SoundEffect::Swoosh),
            GameEvent::EventStarted(_)
            | GameEvent::EventEnded(_)
            | GameEvent::SubmissionReady { .. } => None,
        }
    }
}

/// Playback backend. Failures stay inside the backend.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("sfx {} (vol {:.2})", effect.asset_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cue of every event that has one, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
