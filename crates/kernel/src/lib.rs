//! World kernel: frame orchestration over the scene graph.
//!
//! # Invariants
//! - One [`World::update`] runs the frame steps in a fixed order: scroll,
//!   queue boundary and guidance commands, drain commands, adapt the player,
//!   remove wrecks, resolve collisions, spawn enemies, update entities,
//!   clamp the player, flush sounds.
//! - Commands produced while entities update are delivered next frame.
//! - Given the same config, spawn table and command stream, a run is
//!   reproducible.

pub mod audio;
pub mod collision;
pub mod config;
pub mod error;
pub mod spawn;
pub mod timestep;
pub mod world;

pub use audio::{AudioSink, NullAudio, RecordingAudio};
pub use collision::{Resolution, handle_collisions, matches_categories};
pub use config::WorldConfig;
pub use error::WorldError;
pub use spawn::{SpawnPoint, SpawnTable, WaveEntry};
pub use timestep::FixedTimestep;
pub use world::{MissionStatus, SceneLayers, World, WorldEvent};
