use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::{Category, Rect, unit_vector};

use crate::data::{ProjectileKind, projectile_data};
use crate::entity::Hull;

/// How quickly a guided missile bends toward its target direction.
const APPROACH_RATE: f32 = 200.0;

/// Bullet or guided missile. Projectiles have a single hitpoint and are
/// removed as soon as they are destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    kind: ProjectileKind,
    hull: Hull,
    target_direction: Vec2,
}

impl Projectile {
    pub fn new(kind: ProjectileKind) -> Self {
        Self {
            kind,
            hull: Hull::new(1),
            target_direction: Vec2::ZERO,
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        match self.kind {
            ProjectileKind::EnemyBullet => Category::ENEMY_PROJECTILE,
            ProjectileKind::AlliedBullet | ProjectileKind::Missile => Category::PLAYER_PROJECTILE,
        }
    }

    pub fn is_guided(&self) -> bool {
        self.kind == ProjectileKind::Missile
    }

    pub fn damage(&self) -> i32 {
        projectile_data(self.kind).damage
    }

    pub fn max_speed(&self) -> f32 {
        projectile_data(self.kind).speed
    }

    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    pub fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }

    pub fn velocity(&self) -> Vec2 {
        self.hull.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.hull.velocity = velocity;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull.is_destroyed()
    }

    pub fn destroy(&mut self) {
        self.hull.destroy();
    }

    pub fn target_direction(&self) -> Vec2 {
        self.target_direction
    }

    /// Point the missile at `target`, seen from `own_position` (both world space).
    ///
    /// Only guided projectiles may be steered; calling this on a bullet is a
    /// programmer error.
    pub fn guide_towards(&mut self, own_position: Vec2, target: Vec2) {
        debug_assert!(self.is_guided(), "guide_towards called on unguided {:?}", self.kind);
        self.target_direction = unit_vector(target - own_position);
    }

    pub fn texture_rect(&self) -> Rect {
        projectile_data(self.kind).texture_rect
    }

    pub fn local_bounds(&self) -> Rect {
        Rect::centered(self.texture_rect().size())
    }

    /// Steer (for missiles) and return this frame's displacement. Also
    /// returns the new heading in degrees when the missile turned.
    pub(crate) fn update(&mut self, dt: f32) -> (Vec2, Option<f32>) {
        let mut heading = None;
        if self.is_guided() {
            let steered = unit_vector(APPROACH_RATE * dt * self.target_direction + self.hull.velocity)
                * self.max_speed();
            heading = Some(steered.y.atan2(steered.x).to_degrees() + 90.0);
            self.hull.velocity = steered;
        }
        (self.hull.velocity * dt, heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_owner_side() {
        assert_eq!(Projectile::new(ProjectileKind::AlliedBullet).category(), Category::PLAYER_PROJECTILE);
        assert_eq!(Projectile::new(ProjectileKind::Missile).category(), Category::PLAYER_PROJECTILE);
        assert_eq!(Projectile::new(ProjectileKind::EnemyBullet).category(), Category::ENEMY_PROJECTILE);
    }

    #[test]
    fn bullets_fly_straight() {
        let mut bullet = Projectile::new(ProjectileKind::AlliedBullet);
        bullet.set_velocity(Vec2::new(0.0, -300.0));
        let (step, heading) = bullet.update(0.1);
        assert_eq!(step, Vec2::new(0.0, -30.0));
        assert!(heading.is_none());
    }

    #[test]
    fn unguided_missile_keeps_direction() {
        let mut missile = Projectile::new(ProjectileKind::Missile);
        missile.set_velocity(Vec2::new(0.0, -150.0));
        for _ in 0..10 {
            missile.update(1.0 / 60.0);
        }
        let dir = unit_vector(missile.velocity());
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1e-4);
        assert!((missile.velocity().length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn guided_missile_turns_toward_target() {
        let mut missile = Projectile::new(ProjectileKind::Missile);
        missile.set_velocity(Vec2::new(0.0, -150.0));
        missile.guide_towards(Vec2::ZERO, Vec2::new(100.0, 0.0));
        let (_, heading) = missile.update(0.5);
        assert!(missile.velocity().x > 0.0);
        assert!(heading.is_some());
        assert!((missile.velocity().length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn projectile_dies_in_one_hit() {
        let mut bullet = Projectile::new(ProjectileKind::EnemyBullet);
        bullet.hull_mut().damage(1);
        assert!(bullet.is_destroyed());
    }
}
