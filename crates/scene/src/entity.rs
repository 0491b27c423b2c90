//! State shared by every damageable, moving entity kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Hitpoints and velocity of an entity.
///
/// # Invariants
/// - `0 <= hitpoints <= max_hitpoints`.
/// - An entity is destroyed exactly when its hitpoints are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    hitpoints: i32,
    max_hitpoints: i32,
    pub velocity: Vec2,
}

impl Hull {
    pub fn new(hitpoints: i32) -> Self {
        let hitpoints = hitpoints.max(0);
        Self {
            hitpoints,
            max_hitpoints: hitpoints,
            velocity: Vec2::ZERO,
        }
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> i32 {
        self.max_hitpoints
    }

    pub fn is_destroyed(&self) -> bool {
        self.hitpoints <= 0
    }

    pub fn damage(&mut self, points: i32) {
        self.hitpoints = (self.hitpoints - points.max(0)).max(0);
    }

    pub fn repair(&mut self, points: i32) {
        self.hitpoints = (self.hitpoints + points.max(0)).min(self.max_hitpoints);
    }

    pub fn destroy(&mut self) {
        self.hitpoints = 0;
    }

    pub fn accelerate(&mut self, delta: Vec2) {
        self.velocity += delta;
    }
}

/// Frame-based explosion animation played before a destroyed aircraft is
/// removed from the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    elapsed: f32,
    duration: f32,
    frames: u32,
}

impl Default for Explosion {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            duration: 1.0,
            frames: 16,
        }
    }
}

impl Explosion {
    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current_frame(&self) -> u32 {
        let frame = (self.elapsed / self.duration * self.frames as f32) as u32;
        frame.min(self.frames - 1)
    }
}
