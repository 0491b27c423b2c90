//! Particle trails: emitters ride on their carrier (e.g. a missile) and feed
//! world-space particles into the matching particle system on the air layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::Category;
use std::collections::VecDeque;

use crate::command::{Command, CommandAction};
use crate::data::{ParticleKind, particle_data};
use crate::node::UpdateContext;

/// Particles emitted per second by a single emitter.
const EMISSION_RATE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    /// Seconds left before the particle expires.
    pub lifetime: f32,
}

/// Owns every live particle of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSystem {
    kind: ParticleKind,
    particles: VecDeque<Particle>,
}

impl ParticleSystem {
    pub fn new(kind: ParticleKind) -> Self {
        Self {
            kind,
            particles: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn add_particle(&mut self, position: Vec2) {
        self.particles.push_back(Particle {
            position,
            lifetime: particle_data(self.kind).lifetime,
        });
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Opacity in `[0, 1]`, fading as the particle ages.
    pub fn alpha(&self, particle: &Particle) -> f32 {
        (particle.lifetime / particle_data(self.kind).lifetime).clamp(0.0, 1.0)
    }

    pub(crate) fn update(&mut self, dt: f32) {
        // Particles are appended in emission order, so the oldest expire first.
        while self.particles.front().is_some_and(|p| p.lifetime <= dt) {
            self.particles.pop_front();
        }
        for particle in &mut self.particles {
            particle.lifetime -= dt;
        }
    }
}

/// Emits particles at its world position at a fixed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    kind: ParticleKind,
    accumulated: f32,
}

impl Emitter {
    pub fn new(kind: ParticleKind) -> Self {
        Self {
            kind,
            accumulated: 0.0,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub(crate) fn update(&mut self, position: Vec2, ctx: &mut UpdateContext<'_>) {
        let interval = 1.0 / EMISSION_RATE;
        self.accumulated += ctx.dt;
        let mut count = 0;
        while self.accumulated > interval {
            self.accumulated -= interval;
            count += 1;
        }
        if count > 0 {
            ctx.commands.push(Command::new(
                Category::PARTICLE_SYSTEM,
                CommandAction::EmitParticles {
                    kind: self.kind,
                    position,
                    count,
                },
            ));
        }
    }
}
