//! Static gameplay tables: per-kind hitpoints, speeds, fire intervals,
//! sprite regions and movement patterns.

use serde::{Deserialize, Serialize};
use skystrike_common::Rect;

/// Aircraft variants. `Eagle` is the player's aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftKind {
    Eagle,
    Raptor,
    Avenger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    AlliedBullet,
    EnemyBullet,
    Missile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    HealthRefill,
    MissileRefill,
    FireSpread,
    FireRate,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::HealthRefill,
        PickupKind::MissileRefill,
        PickupKind::FireSpread,
        PickupKind::FireRate,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Propellant,
    Smoke,
}

/// One leg of a movement pattern: fly at `angle` degrees off straight ahead
/// until `distance` units have been covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub angle: f32,
    pub distance: f32,
}

impl Direction {
    pub const fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftData {
    pub hitpoints: i32,
    pub speed: f32,
    /// Seconds between shots at fire rate level 0. Zero means the kind never fires.
    pub fire_interval: f32,
    pub texture_rect: Rect,
    pub directions: &'static [Direction],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileData {
    pub damage: i32,
    pub speed: f32,
    pub texture_rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupData {
    pub texture_rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleData {
    pub color: [u8; 3],
    pub lifetime: f32,
}

const RAPTOR_PATTERN: [Direction; 3] = [
    Direction::new(45.0, 80.0),
    Direction::new(-45.0, 160.0),
    Direction::new(45.0, 80.0),
];

const AVENGER_PATTERN: [Direction; 5] = [
    Direction::new(45.0, 50.0),
    Direction::new(0.0, 50.0),
    Direction::new(-45.0, 100.0),
    Direction::new(0.0, 50.0),
    Direction::new(45.0, 50.0),
];

pub fn aircraft_data(kind: AircraftKind) -> AircraftData {
    match kind {
        AircraftKind::Eagle => AircraftData {
            hitpoints: 100,
            speed: 300.0,
            fire_interval: 1.0,
            texture_rect: Rect::new(0.0, 0.0, 48.0, 64.0),
            directions: &[],
        },
        AircraftKind::Raptor => AircraftData {
            hitpoints: 20,
            speed: 80.0,
            fire_interval: 1.0,
            texture_rect: Rect::new(144.0, 0.0, 84.0, 64.0),
            directions: &RAPTOR_PATTERN,
        },
        AircraftKind::Avenger => AircraftData {
            hitpoints: 40,
            speed: 160.0,
            fire_interval: 2.0,
            texture_rect: Rect::new(228.0, 0.0, 60.0, 59.0),
            directions: &AVENGER_PATTERN,
        },
    }
}

pub fn projectile_data(kind: ProjectileKind) -> ProjectileData {
    match kind {
        ProjectileKind::AlliedBullet | ProjectileKind::EnemyBullet => ProjectileData {
            damage: 10,
            speed: 300.0,
            texture_rect: Rect::new(175.0, 64.0, 3.0, 14.0),
        },
        ProjectileKind::Missile => ProjectileData {
            damage: 200,
            speed: 150.0,
            texture_rect: Rect::new(160.0, 64.0, 15.0, 32.0),
        },
    }
}

pub fn pickup_data(kind: PickupKind) -> PickupData {
    let column = match kind {
        PickupKind::HealthRefill => 0.0,
        PickupKind::MissileRefill => 1.0,
        PickupKind::FireSpread => 2.0,
        PickupKind::FireRate => 3.0,
    };
    PickupData {
        texture_rect: Rect::new(column * 40.0, 64.0, 40.0, 40.0),
    }
}

pub fn particle_data(kind: ParticleKind) -> ParticleData {
    match kind {
        ParticleKind::Propellant => ParticleData {
            color: [255, 255, 50],
            lifetime: 0.6,
        },
        ParticleKind::Smoke => ParticleData {
            color: [50, 50, 50],
            lifetime: 4.0,
        },
    }
}
