//! World tuning knobs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Static parameters of a mission. Every field has a default, so partial
/// YAML/JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Size of the visible area in world units.
    pub view_size: Vec2,
    /// Total scrollable height of the level.
    pub world_height: f32,
    /// Vertical view speed in units per second (negative scrolls up).
    pub scroll_speed: f32,
    /// Extra space above the view where enemies spawn and entities survive.
    pub battlefield_margin: f32,
    /// Minimum distance between the player and the view edges.
    pub border_distance: f32,
    /// Velocity added per movement command.
    pub player_speed: f32,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view_size: Vec2::new(1280.0, 720.0),
            world_height: 6000.0,
            scroll_speed: -100.0,
            battlefield_margin: 100.0,
            border_distance: 40.0,
            player_speed: 200.0,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "view size must be positive, got {}x{}",
                self.view_size.x, self.view_size.y
            )));
        }
        if self.world_height < self.view_size.y {
            return Err(WorldError::InvalidConfig(format!(
                "world height {} is smaller than the view height {}",
                self.world_height, self.view_size.y
            )));
        }
        if self.border_distance * 2.0 > self.view_size.x.min(self.view_size.y) {
            return Err(WorldError::InvalidConfig(format!(
                "border distance {} leaves no room inside the view",
                self.border_distance
            )));
        }
        if self.battlefield_margin < 0.0 {
            return Err(WorldError::InvalidConfig("battlefield margin must not be negative".into()));
        }
        Ok(())
    }

    /// Where the player starts: horizontally centred, half a view above the
    /// bottom of the level.
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.view_size.x / 2.0, self.world_height - self.view_size.y / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = WorldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.spawn_position(), Vec2::new(640.0, 5640.0));
    }

    #[test]
    fn rejects_degenerate_view() {
        let config = WorldConfig {
            view_size: Vec2::new(0.0, 720.0),
            ..WorldConfig::default()
        };
        assert!(matches!(config.validate(), Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_level_shorter_than_view() {
        let config = WorldConfig {
            world_height: 100.0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: WorldConfig = serde_yaml::from_str("scroll_speed: -50.0\nseed: 7\n").unwrap();
        assert_eq!(config.scroll_speed, -50.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.world_height, 6000.0);
    }
}
