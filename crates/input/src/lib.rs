//! Player input: keys, input sources and the bindings that turn them into
//! player-aircraft commands.
//!
//! # Invariants
//! - Input never touches the scene directly; it only pushes commands.
//! - Each key is bound to at most one action and each action to at most one key.

pub mod action;
pub mod player;
pub mod source;

pub use action::PlayerAction;
pub use player::Player;
pub use source::{InputError, InputEvent, InputSource, Key, ScriptedInput};
