use serde::{Deserialize, Serialize};
use skystrike_common::Rect;

use crate::aircraft::Aircraft;
use crate::data::{PickupKind, pickup_data};
use crate::entity::Hull;

const HEALTH_REFILL: i32 = 25;
const MISSILE_REFILL: u32 = 3;

/// Power-up dropped by destroyed enemies and collected by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    kind: PickupKind,
    hull: Hull,
}

impl Pickup {
    pub fn new(kind: PickupKind) -> Self {
        Self {
            kind,
            hull: Hull::new(1),
        }
    }

    pub fn kind(&self) -> PickupKind {
        self.kind
    }

    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    pub fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull.is_destroyed()
    }

    pub fn destroy(&mut self) {
        self.hull.destroy();
    }

    pub fn texture_rect(&self) -> Rect {
        pickup_data(self.kind).texture_rect
    }

    pub fn local_bounds(&self) -> Rect {
        Rect::centered(self.texture_rect().size())
    }
}

impl PickupKind {
    /// Apply this pickup's effect to the collecting aircraft.
    pub fn apply(self, aircraft: &mut Aircraft) {
        match self {
            PickupKind::HealthRefill => aircraft.repair(HEALTH_REFILL),
            PickupKind::MissileRefill => aircraft.collect_missiles(MISSILE_REFILL),
            PickupKind::FireSpread => aircraft.increase_spread(),
            PickupKind::FireRate => aircraft.increase_fire_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AircraftKind;

    #[test]
    fn health_refill_repairs_up_to_max() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        player.damage(10);
        PickupKind::HealthRefill.apply(&mut player);
        assert_eq!(player.hitpoints(), 100);

        player.damage(50);
        PickupKind::HealthRefill.apply(&mut player);
        assert_eq!(player.hitpoints(), 75);
    }

    #[test]
    fn missile_refill_adds_three() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        PickupKind::MissileRefill.apply(&mut player);
        assert_eq!(player.missile_ammo(), 13);
    }

    #[test]
    fn spread_and_rate_upgrades() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        PickupKind::FireSpread.apply(&mut player);
        PickupKind::FireRate.apply(&mut player);
        assert_eq!(player.spread_level(), 2);
        assert_eq!(player.fire_rate_level(), 2);
    }

    #[test]
    fn pickup_bounds_are_centered() {
        let pickup = Pickup::new(PickupKind::FireRate);
        let bounds = pickup.local_bounds();
        assert_eq!(bounds, Rect::new(-20.0, -20.0, 40.0, 40.0));
    }
}
