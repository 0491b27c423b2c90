use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::Category;
use skystrike_scene::{Command, CommandAction};

/// Something the player asks their aircraft to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    LaunchMissile,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 6] = [
        PlayerAction::MoveLeft,
        PlayerAction::MoveRight,
        PlayerAction::MoveUp,
        PlayerAction::MoveDown,
        PlayerAction::Fire,
        PlayerAction::LaunchMissile,
    ];

    /// Realtime actions repeat every frame while their key is held; the
    /// others fire once per key press.
    pub fn is_realtime(self) -> bool {
        !matches!(self, PlayerAction::LaunchMissile)
    }

    /// Command addressed to the player aircraft.
    pub fn command(self, speed: f32) -> Command {
        let action = match self {
            PlayerAction::MoveLeft => CommandAction::Accelerate(Vec2::new(-speed, 0.0)),
            PlayerAction::MoveRight => CommandAction::Accelerate(Vec2::new(speed, 0.0)),
            PlayerAction::MoveUp => CommandAction::Accelerate(Vec2::new(0.0, -speed)),
            PlayerAction::MoveDown => CommandAction::Accelerate(Vec2::new(0.0, speed)),
            PlayerAction::Fire => CommandAction::Fire,
            PlayerAction::LaunchMissile => CommandAction::LaunchMissile,
        };
        Command::new(Category::PLAYER_AIRCRAFT, action)
    }
}
