//! Positional audio output.

use glam::Vec2;
use skystrike_common::EffectId;

/// Backend that plays sound effects in world space.
pub trait AudioSink {
    fn play(&mut self, effect: EffectId, position: Vec2);
    fn set_listener_position(&mut self, position: Vec2);
    /// Drop finished sounds.
    fn remove_stopped_sounds(&mut self);
}

/// Sink that keeps everything it is asked to play. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<(EffectId, Vec2)>,
    pub listener: Vec2,
    pub prune_calls: u64,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, effect: EffectId) -> usize {
        self.played.iter().filter(|(e, _)| *e == effect).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: EffectId, position: Vec2) {
        self.played.push((effect, position));
    }

    fn set_listener_position(&mut self, position: Vec2) {
        self.listener = position;
    }

    fn remove_stopped_sounds(&mut self) {
        self.prune_calls += 1;
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: EffectId, _position: Vec2) {}

    fn set_listener_position(&mut self, _position: Vec2) {}

    fn remove_stopped_sounds(&mut self) {}
}
