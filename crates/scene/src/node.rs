//! Scene nodes: generational handles, per-node data and the closed set of
//! node kinds.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::{Category, Rect, Rng, TextureId, Transform};
use std::fmt;

use crate::aircraft::Aircraft;
use crate::command::CommandQueue;
use crate::particles::{Emitter, ParticleSystem};
use crate::pickup::Pickup;
use crate::projectile::Projectile;
use crate::sound::SoundSink;

/// Handle to a node in a [`SceneGraph`](crate::SceneGraph).
///
/// A handle stays valid until its node is removed from the graph. The slot
/// may then be reused with a higher generation, so stale handles never alias
/// a newer node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

/// Static textured quad, drawn from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureId,
    pub region: Rect,
}

/// Behavior of a node. Each variant carries only what its behavior needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Grouping node with a fixed category (scene layers and the root).
    Layer(Category),
    Sprite(Sprite),
    Aircraft(Aircraft),
    Projectile(Projectile),
    Pickup(Pickup),
    Emitter(Emitter),
    Particles(ParticleSystem),
    Sound(SoundSink),
}

/// Mutable state handed down the tree during [`SceneGraph::update`](crate::SceneGraph::update).
pub struct UpdateContext<'a> {
    pub dt: f32,
    pub commands: &'a mut CommandQueue,
    pub rng: &'a mut Rng,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) transform: Transform,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind, transform: Transform) -> Self {
        Self {
            transform,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// The node's own category. Children never inherit their parent's.
    pub fn category(&self) -> Category {
        match &self.kind {
            NodeKind::Layer(category) => *category,
            NodeKind::Aircraft(a) => a.category(),
            NodeKind::Projectile(p) => p.category(),
            NodeKind::Pickup(_) => Category::PICKUP,
            NodeKind::Particles(_) => Category::PARTICLE_SYSTEM,
            NodeKind::Sound(_) => Category::SOUND_EFFECT,
            NodeKind::Sprite(_) | NodeKind::Emitter(_) => Category::NONE,
        }
    }

    /// Destroyed entities stay in the tree until marked for removal.
    /// Non-entity nodes are never destroyed.
    pub fn is_destroyed(&self) -> bool {
        match &self.kind {
            NodeKind::Aircraft(a) => a.is_destroyed(),
            NodeKind::Projectile(p) => p.is_destroyed(),
            NodeKind::Pickup(p) => p.is_destroyed(),
            _ => false,
        }
    }

    pub fn is_marked_for_removal(&self) -> bool {
        match &self.kind {
            NodeKind::Aircraft(a) => a.is_marked_for_removal(),
            NodeKind::Projectile(p) => p.is_destroyed(),
            NodeKind::Pickup(p) => p.is_destroyed(),
            _ => false,
        }
    }

    /// Destroy the node if it is an entity; no-op otherwise.
    pub fn destroy(&mut self) {
        match &mut self.kind {
            NodeKind::Aircraft(a) => a.destroy(),
            NodeKind::Projectile(p) => p.destroy(),
            NodeKind::Pickup(p) => p.destroy(),
            _ => {}
        }
    }

    /// Collision box in local coordinates. Only entities have one.
    pub fn local_bounds(&self) -> Option<Rect> {
        match &self.kind {
            NodeKind::Aircraft(a) => Some(a.local_bounds()),
            NodeKind::Projectile(p) => Some(p.local_bounds()),
            NodeKind::Pickup(p) => Some(p.local_bounds()),
            _ => None,
        }
    }

    pub fn as_aircraft(&self) -> Option<&Aircraft> {
        match &self.kind {
            NodeKind::Aircraft(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_aircraft_mut(&mut self) -> Option<&mut Aircraft> {
        match &mut self.kind {
            NodeKind::Aircraft(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            NodeKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_projectile_mut(&mut self) -> Option<&mut Projectile> {
        match &mut self.kind {
            NodeKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pickup(&self) -> Option<&Pickup> {
        match &self.kind {
            NodeKind::Pickup(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sound_mut(&mut self) -> Option<&mut SoundSink> {
        match &mut self.kind {
            NodeKind::Sound(s) => Some(s),
            _ => None,
        }
    }

    /// Kind-specific behavior for one frame. `world_position` is where the
    /// node sits before it moves this frame.
    pub(crate) fn update_current(&mut self, world_position: Vec2, ctx: &mut UpdateContext<'_>) {
        match &mut self.kind {
            NodeKind::Aircraft(aircraft) => {
                let step = aircraft.update(world_position, ctx);
                self.transform.translate(step);
            }
            NodeKind::Projectile(projectile) => {
                let (step, heading) = projectile.update(ctx.dt);
                if let Some(rotation) = heading {
                    self.transform.rotation = rotation;
                }
                self.transform.translate(step);
            }
            NodeKind::Pickup(pickup) => {
                let step = pickup.hull().velocity * ctx.dt;
                self.transform.translate(step);
            }
            NodeKind::Emitter(emitter) => emitter.update(world_position, ctx),
            NodeKind::Particles(system) => system.update(ctx.dt),
            NodeKind::Layer(_) | NodeKind::Sprite(_) | NodeKind::Sound(_) => {}
        }
    }
}
