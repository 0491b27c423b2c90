//! Scene: arena-backed node tree, entity kinds, category-addressed commands
//! and collision detection.
//!
//! # Invariants
//! - Nodes are owned by the [`SceneGraph`]; everything else holds [`NodeId`]s.
//! - Traversals are pre-order with children in insertion order.
//! - Commands reach nodes only through [`SceneGraph::on_command`].

pub mod aircraft;
pub mod collision;
pub mod command;
pub mod data;
pub mod draw;
pub mod entity;
pub mod error;
pub mod graph;
pub mod node;
pub mod particles;
pub mod pickup;
pub mod projectile;
pub mod sound;

pub use aircraft::Aircraft;
pub use collision::Pair;
pub use command::{Command, CommandAction, CommandQueue, ProjectileSpawn};
pub use data::{AircraftKind, ParticleKind, PickupKind, ProjectileKind};
pub use draw::{Canvas, Drawable};
pub use entity::{Explosion, Hull};
pub use error::SceneError;
pub use graph::SceneGraph;
pub use node::{Node, NodeId, NodeKind, Sprite, UpdateContext};
pub use particles::{Emitter, Particle, ParticleSystem};
pub use pickup::Pickup;
pub use projectile::Projectile;
pub use sound::{SoundRequest, SoundSink};
