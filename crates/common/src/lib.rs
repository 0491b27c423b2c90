//! Shared types for the skystrike runtime: 2D transforms and rectangles,
//! category bitmasks, resource identifiers and the deterministic RNG.

pub mod category;
pub mod ids;
pub mod rng;
pub mod types;

pub use category::Category;
pub use ids::{EffectId, TextureId};
pub use rng::Rng;
pub use types::{Rect, Transform, distance, unit_vector};
