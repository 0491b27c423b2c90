use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Routing and collision class of a scene node.
///
/// A node's category may combine several flags. Commands address nodes by
/// category: a command reaches every node whose category shares at least one
/// bit with the command's category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Category(u32);

impl Category {
    pub const NONE: Category = Category(0);
    /// Marker for the layer that receives spawned projectiles, pickups and particles.
    pub const SCENE_AIR_LAYER: Category = Category(1 << 0);
    pub const PLAYER_AIRCRAFT: Category = Category(1 << 1);
    pub const ENEMY_AIRCRAFT: Category = Category(1 << 2);
    pub const PICKUP: Category = Category(1 << 3);
    pub const PLAYER_PROJECTILE: Category = Category(1 << 4);
    pub const ENEMY_PROJECTILE: Category = Category(1 << 5);
    pub const PARTICLE_SYSTEM: Category = Category(1 << 6);
    pub const SOUND_EFFECT: Category = Category(1 << 7);

    pub const AIRCRAFT: Category = Category(Self::PLAYER_AIRCRAFT.0 | Self::ENEMY_AIRCRAFT.0);
    pub const PROJECTILE: Category = Category(Self::PLAYER_PROJECTILE.0 | Self::ENEMY_PROJECTILE.0);

    const NAMES: [(Category, &'static str); 8] = [
        (Self::SCENE_AIR_LAYER, "SCENE_AIR_LAYER"),
        (Self::PLAYER_AIRCRAFT, "PLAYER_AIRCRAFT"),
        (Self::ENEMY_AIRCRAFT, "ENEMY_AIRCRAFT"),
        (Self::PICKUP, "PICKUP"),
        (Self::PLAYER_PROJECTILE, "PLAYER_PROJECTILE"),
        (Self::ENEMY_PROJECTILE, "ENEMY_PROJECTILE"),
        (Self::PARTICLE_SYSTEM, "PARTICLE_SYSTEM"),
        (Self::SOUND_EFFECT, "SOUND_EFFECT"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True when the two masks share at least one flag.
    pub const fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    /// True when every flag of `other` is set in `self`.
    pub const fn contains(self, other: Category) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Category) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Category {
    type Output = Category;

    fn bitand(self, rhs: Category) -> Category {
        Category(self.0 & rhs.0)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "Category(NONE)");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Category({})", names.join(" | "))
    }
}
