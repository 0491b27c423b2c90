//! Keys, key events and where they come from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Keyboard keys the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    /// A letter or digit key, stored lowercase.
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let key = match name.as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c),
                    _ => return Err(InputError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Space => f.write_str("space"),
            Key::Enter => f.write_str("enter"),
            Key::Escape => f.write_str("escape"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Discrete key transitions, delivered once each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
}

/// Polled keyboard state.
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Input source driven by code: keys are held and released explicitly, and
/// every transition is also recorded as an event. Used by headless runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: BTreeSet<Key>,
    events: Vec<InputEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.events.push(InputEvent::KeyPressed(key));
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.events.push(InputEvent::KeyReleased(key));
        }
    }

    /// Press and immediately release `key`.
    pub fn tap(&mut self, key: Key) {
        self.press(key);
        self.release(key);
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    /// Events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InputSource for ScriptedInput {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_names() {
        assert_eq!("Left".parse::<Key>().unwrap(), Key::Left);
        assert_eq!(" space ".parse::<Key>().unwrap(), Key::Space);
        assert_eq!("M".parse::<Key>().unwrap(), Key::Char('m'));
        assert_eq!(
            "f13".parse::<Key>(),
            Err(InputError::UnknownKey("f13".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for key in [Key::Up, Key::Escape, Key::Char('x')] {
            assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
        }
    }

    #[test]
    fn scripted_input_tracks_held_keys_and_events() {
        let mut input = ScriptedInput::new();
        input.press(Key::Left);
        input.press(Key::Left);
        assert!(input.is_key_pressed(Key::Left));
        input.tap(Key::Char('m'));
        assert!(!input.is_key_pressed(Key::Char('m')));

        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::KeyPressed(Key::Left),
                InputEvent::KeyPressed(Key::Char('m')),
                InputEvent::KeyReleased(Key::Char('m')),
            ]
        );
        assert!(input.drain_events().is_empty());
    }
}
