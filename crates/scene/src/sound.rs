use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::EffectId;

/// A sound requested by the scene, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub effect: EffectId,
    pub position: Vec2,
}

/// Scene node that collects play-sound commands until the world hands them
/// to the audio backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundSink {
    pending: Vec<SoundRequest>,
}

impl SoundSink {
    pub fn play(&mut self, effect: EffectId, position: Vec2) {
        self.pending.push(SoundRequest { effect, position });
    }

    pub fn pending(&self) -> &[SoundRequest] {
        &self.pending
    }

    pub fn take_pending(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.pending)
    }
}
