//! Enemy wave tables and the spawn points derived from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_scene::AircraftKind;

use crate::error::WorldError;

/// One enemy of a wave, placed relative to the player's start position.
/// `x` is a horizontal offset, `y` the distance ahead of the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    pub kind: AircraftKind,
    pub x: f32,
    pub y: f32,
}

impl WaveEntry {
    pub const fn new(kind: AircraftKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

/// Absolute spawn location of a pending enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: AircraftKind,
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Enemy layout of a mission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub waves: Vec<WaveEntry>,
}

impl SpawnTable {
    /// The stock mission: raptor screens early, avenger blocks later on.
    pub fn standard() -> Self {
        use AircraftKind::{Avenger, Raptor};
        let waves = vec![
            WaveEntry::new(Raptor, 0.0, 1500.0),
            WaveEntry::new(Raptor, -170.0, 1500.0),
            WaveEntry::new(Raptor, 170.0, 1500.0),
            WaveEntry::new(Raptor, 0.0, 1000.0),
            WaveEntry::new(Raptor, -170.0, 500.0),
            WaveEntry::new(Raptor, 170.0, 1000.0),
            WaveEntry::new(Raptor, 100.0, 1100.0),
            WaveEntry::new(Raptor, -100.0, 1100.0),
            WaveEntry::new(Avenger, -70.0, 1400.0),
            WaveEntry::new(Avenger, -70.0, 1600.0),
            WaveEntry::new(Avenger, 70.0, 1400.0),
            WaveEntry::new(Avenger, 70.0, 1600.0),
            WaveEntry::new(Raptor, 0.0, 2500.0),
            WaveEntry::new(Raptor, 0.0, 3000.0),
            WaveEntry::new(Raptor, 100.0, 4100.0),
            WaveEntry::new(Raptor, -100.0, 4100.0),
            WaveEntry::new(Avenger, -70.0, 4400.0),
            WaveEntry::new(Avenger, -70.0, 4600.0),
            WaveEntry::new(Avenger, -170.0, 5400.0),
            WaveEntry::new(Avenger, 0.0, 5400.0),
            WaveEntry::new(Avenger, 170.0, 5400.0),
            WaveEntry::new(Avenger, -170.0, 5600.0),
            WaveEntry::new(Avenger, 0.0, 5600.0),
            WaveEntry::new(Avenger, 170.0, 5600.0),
        ];
        Self { waves }
    }

    pub fn from_yaml(source: &str) -> Result<Self, WorldError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, WorldError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Resolve every entry against `origin` and sort ascending by world y,
    /// so the next enemy to appear sits at the end of the list.
    pub fn spawn_points(&self, origin: Vec2) -> Vec<SpawnPoint> {
        let mut points: Vec<SpawnPoint> = self
            .waves
            .iter()
            .map(|w| SpawnPoint {
                kind: w.kind,
                x: origin.x + w.x,
                y: origin.y - w.y,
            })
            .collect();
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
        points
    }
}
