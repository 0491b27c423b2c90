//! Category-addressed deferred work.
//!
//! Producers (input handling, entity behavior, world orchestration, collision
//! resolution) push [`Command`]s without holding references to the nodes they
//! act on. Once per frame the queue is drained in push order and each command
//! is broadcast through [`SceneGraph::on_command`](crate::SceneGraph::on_command)
//! to every node whose category intersects the command's category.
//!
//! # Invariants
//! - Delivery order equals push order; nothing is retried or reordered.
//! - A command runs exactly once per matching node per queued instance.
//! - Popping an empty queue is a programmer error and panics.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::{Category, EffectId, Rect};
use std::collections::VecDeque;

use crate::data::{ParticleKind, PickupKind, ProjectileKind};

/// A projectile to create under the receiving layer, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// What a command does to each node it reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandAction {
    /// Add to an aircraft's velocity for this frame.
    Accelerate(Vec2),
    /// Request a gun burst from an aircraft.
    Fire,
    /// Request a missile launch from an aircraft (consumes ammo).
    LaunchMissile,
    /// Steer every guided projectile toward the nearest live enemy aircraft.
    GuideMissiles,
    /// Destroy entities whose bounding box lies outside the given bounds.
    DestroyOutside(Rect),
    /// Attach new projectiles to the receiving layer.
    SpawnProjectiles(Vec<ProjectileSpawn>),
    /// Attach a pickup to the receiving layer.
    DropPickup { kind: PickupKind, position: Vec2 },
    /// Feed particles into the receiving particle system of the same kind.
    EmitParticles {
        kind: ParticleKind,
        position: Vec2,
        count: u32,
    },
    /// Queue a positional sound on the receiving sound node.
    PlaySound { effect: EffectId, position: Vec2 },
}

/// A unit of deferred work addressed to every node in `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub category: Category,
    pub action: CommandAction,
}

impl Command {
    pub fn new(category: Category, action: CommandAction) -> Self {
        Self { category, action }
    }

    /// Sound effect command addressed to the scene's sound node.
    pub fn play_sound(effect: EffectId, position: Vec2) -> Self {
        Self::new(
            Category::SOUND_EFFECT,
            CommandAction::PlaySound { effect, position },
        )
    }
}

/// FIFO buffer of commands, drained once per frame.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Remove the oldest command.
    ///
    /// # Panics
    /// When the queue is empty. Check [`is_empty`](Self::is_empty) first.
    pub fn pop(&mut self) -> Command {
        match self.queue.pop_front() {
            Some(command) => command,
            None => panic!("pop called on an empty command queue"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Read-only view of pending commands, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_commands_in_push_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::new(Category::PLAYER_AIRCRAFT, CommandAction::Fire));
        queue.push(Command::new(
            Category::PLAYER_AIRCRAFT,
            CommandAction::LaunchMissile,
        ));
        queue.push(Command::new(
            Category::PLAYER_AIRCRAFT,
            CommandAction::Accelerate(Vec2::new(1.0, 0.0)),
        ));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().action, CommandAction::Fire);
        assert_eq!(queue.pop().action, CommandAction::LaunchMissile);
        assert!(matches!(queue.pop().action, CommandAction::Accelerate(_)));
        assert!(queue.is_empty());
    }

    #[test]
    fn duplicate_commands_are_both_kept() {
        let mut queue = CommandQueue::new();
        let fire = Command::new(Category::PLAYER_AIRCRAFT, CommandAction::Fire);
        queue.push(fire.clone());
        queue.push(fire);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    #[should_panic(expected = "empty command queue")]
    fn pop_on_empty_queue_panics() {
        let mut queue = CommandQueue::new();
        queue.pop();
    }

    #[test]
    fn play_sound_targets_sound_nodes() {
        let cmd = Command::play_sound(EffectId::CollectPickup, Vec2::new(5.0, 6.0));
        assert_eq!(cmd.category, Category::SOUND_EFFECT);
    }
}
