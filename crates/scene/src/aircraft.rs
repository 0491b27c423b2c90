use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::{Category, EffectId, Rect};

use crate::command::{Command, CommandAction, ProjectileSpawn};
use crate::data::{AircraftKind, PickupKind, ProjectileKind, aircraft_data, projectile_data};
use crate::entity::{Explosion, Hull};
use crate::node::UpdateContext;

const MAX_FIRE_RATE: u32 = 10;
const MAX_SPREAD: u32 = 3;
const STARTING_MISSILES: u32 = 10;

/// Player or enemy aircraft.
///
/// Enemies fly their kind's movement pattern and fire continuously; the
/// player fires and launches missiles on request. A destroyed aircraft keeps
/// playing its explosion (and may drop a pickup) until it is marked for
/// removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    kind: AircraftKind,
    hull: Hull,
    explosion: Explosion,
    spawned_pickup: bool,
    played_explosion_sound: bool,
    fire_countdown: f32,
    is_firing: bool,
    is_launching_missile: bool,
    missile_ammo: u32,
    fire_rate_level: u32,
    spread_level: u32,
    travelled_distance: f32,
    direction_index: usize,
}

impl Aircraft {
    pub fn new(kind: AircraftKind) -> Self {
        Self {
            kind,
            hull: Hull::new(aircraft_data(kind).hitpoints),
            explosion: Explosion::default(),
            spawned_pickup: false,
            played_explosion_sound: false,
            fire_countdown: 0.0,
            is_firing: false,
            is_launching_missile: false,
            missile_ammo: STARTING_MISSILES,
            fire_rate_level: 1,
            spread_level: 1,
            travelled_distance: 0.0,
            direction_index: 0,
        }
    }

    pub fn kind(&self) -> AircraftKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        match self.kind {
            AircraftKind::Eagle => Category::PLAYER_AIRCRAFT,
            AircraftKind::Raptor | AircraftKind::Avenger => Category::ENEMY_AIRCRAFT,
        }
    }

    pub fn is_allied(&self) -> bool {
        self.kind == AircraftKind::Eagle
    }

    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    pub fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }

    pub fn hitpoints(&self) -> i32 {
        self.hull.hitpoints()
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull.is_destroyed()
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.is_destroyed() && self.explosion.is_finished()
    }

    pub fn explosion(&self) -> &Explosion {
        &self.explosion
    }

    pub fn velocity(&self) -> Vec2 {
        self.hull.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.hull.velocity = velocity;
    }

    pub fn accelerate(&mut self, delta: Vec2) {
        self.hull.accelerate(delta);
    }

    pub fn damage(&mut self, points: i32) {
        self.hull.damage(points);
    }

    pub fn repair(&mut self, points: i32) {
        self.hull.repair(points);
    }

    pub fn destroy(&mut self) {
        self.hull.destroy();
    }

    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    pub fn spread_level(&self) -> u32 {
        self.spread_level
    }

    pub fn increase_fire_rate(&mut self) {
        if self.fire_rate_level < MAX_FIRE_RATE {
            self.fire_rate_level += 1;
        }
    }

    pub fn increase_spread(&mut self) {
        if self.spread_level < MAX_SPREAD {
            self.spread_level += 1;
        }
    }

    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo += count;
    }

    /// Arm the gun for this frame. Kinds without a fire interval never fire.
    pub fn fire(&mut self) {
        if aircraft_data(self.kind).fire_interval > 0.0 {
            self.is_firing = true;
        }
    }

    pub fn launch_missile(&mut self) {
        if self.missile_ammo > 0 {
            self.is_launching_missile = true;
            self.missile_ammo -= 1;
        }
    }

    pub fn texture_rect(&self) -> Rect {
        aircraft_data(self.kind).texture_rect
    }

    pub fn local_bounds(&self) -> Rect {
        Rect::centered(self.texture_rect().size())
    }

    /// Per-frame behavior. `position` is the aircraft's world position.
    pub(crate) fn update(&mut self, position: Vec2, ctx: &mut UpdateContext<'_>) -> Vec2 {
        if self.is_destroyed() {
            self.check_pickup_drop(position, ctx);
            self.explosion.update(ctx.dt);
            if !self.played_explosion_sound {
                let effect = if ctx.rng.below(2) == 0 {
                    EffectId::Explosion1
                } else {
                    EffectId::Explosion2
                };
                ctx.commands.push(Command::play_sound(effect, position));
                self.played_explosion_sound = true;
            }
            return Vec2::ZERO;
        }

        self.update_movement_pattern(ctx.dt);
        self.check_projectile_launch(position, ctx);
        self.hull.velocity * ctx.dt
    }

    fn update_movement_pattern(&mut self, dt: f32) {
        let data = aircraft_data(self.kind);
        if data.directions.is_empty() {
            return;
        }
        if self.travelled_distance > data.directions[self.direction_index].distance {
            self.direction_index = (self.direction_index + 1) % data.directions.len();
            self.travelled_distance = 0.0;
        }

        let radians = (data.directions[self.direction_index].angle + 90.0).to_radians();
        self.hull.velocity = Vec2::new(radians.cos(), radians.sin()) * data.speed;
        self.travelled_distance += data.speed * dt;
    }

    fn check_pickup_drop(&mut self, position: Vec2, ctx: &mut UpdateContext<'_>) {
        if self.spawned_pickup {
            return;
        }
        self.spawned_pickup = true;
        if self.is_allied() || ctx.rng.below(2) != 0 {
            return;
        }
        let kind = PickupKind::ALL[ctx.rng.below(PickupKind::ALL.len() as u32) as usize];
        ctx.commands.push(Command::new(
            Category::SCENE_AIR_LAYER,
            CommandAction::DropPickup { kind, position },
        ));
    }

    fn check_projectile_launch(&mut self, position: Vec2, ctx: &mut UpdateContext<'_>) {
        if !self.is_allied() {
            self.fire();
        }

        if self.is_firing && self.fire_countdown <= 0.0 {
            ctx.commands.push(Command::new(
                Category::SCENE_AIR_LAYER,
                CommandAction::SpawnProjectiles(self.bullet_spawns(position)),
            ));
            self.fire_countdown +=
                aircraft_data(self.kind).fire_interval / (self.fire_rate_level as f32 + 1.0);
            let effect = if self.is_allied() {
                EffectId::AlliedGunfire
            } else {
                EffectId::EnemyGunfire
            };
            ctx.commands.push(Command::play_sound(effect, position));
        } else if self.fire_countdown > 0.0 {
            self.fire_countdown -= ctx.dt;
        }
        self.is_firing = false;

        if self.is_launching_missile {
            ctx.commands.push(Command::new(
                Category::SCENE_AIR_LAYER,
                CommandAction::SpawnProjectiles(vec![self.projectile_spawn(
                    ProjectileKind::Missile,
                    position,
                    0.0,
                    0.5,
                )]),
            ));
            self.is_launching_missile = false;
            ctx.commands
                .push(Command::play_sound(EffectId::LaunchMissile, position));
        }
    }

    /// One to three bullets depending on the spread level.
    fn bullet_spawns(&self, position: Vec2) -> Vec<ProjectileSpawn> {
        let kind = if self.is_allied() {
            ProjectileKind::AlliedBullet
        } else {
            ProjectileKind::EnemyBullet
        };
        let offsets: &[(f32, f32)] = match self.spread_level {
            1 => &[(0.0, 0.5)],
            2 => &[(-0.33, 0.33), (0.33, 0.33)],
            _ => &[(-0.5, 0.33), (0.0, 0.5), (0.5, 0.33)],
        };
        offsets
            .iter()
            .map(|&(x, y)| self.projectile_spawn(kind, position, x, y))
            .collect()
    }

    /// Offsets are fractions of this aircraft's sprite size; allied shots go
    /// up the screen, enemy shots go down.
    fn projectile_spawn(
        &self,
        kind: ProjectileKind,
        position: Vec2,
        x_offset: f32,
        y_offset: f32,
    ) -> ProjectileSpawn {
        let size = self.texture_rect().size();
        let sign = if self.is_allied() { -1.0 } else { 1.0 };
        let offset = Vec2::new(x_offset * size.x, y_offset * size.y);
        ProjectileSpawn {
            kind,
            position: position + offset * sign,
            velocity: Vec2::new(0.0, projectile_data(kind).speed) * sign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandQueue;
    use skystrike_common::Rng;

    fn run(aircraft: &mut Aircraft, dt: f32, commands: &mut CommandQueue, rng: &mut Rng) -> Vec2 {
        let mut ctx = UpdateContext {
            dt,
            commands,
            rng,
        };
        aircraft.update(Vec2::new(100.0, 100.0), &mut ctx)
    }

    fn drain(commands: &mut CommandQueue) -> Vec<Command> {
        let mut out = Vec::new();
        while !commands.is_empty() {
            out.push(commands.pop());
        }
        out
    }

    #[test]
    fn categories_follow_kind() {
        assert_eq!(Aircraft::new(AircraftKind::Eagle).category(), Category::PLAYER_AIRCRAFT);
        assert_eq!(Aircraft::new(AircraftKind::Raptor).category(), Category::ENEMY_AIRCRAFT);
        assert_eq!(Aircraft::new(AircraftKind::Avenger).category(), Category::ENEMY_AIRCRAFT);
    }

    #[test]
    fn player_fires_only_when_requested() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);

        run(&mut player, 1.0 / 60.0, &mut commands, &mut rng);
        assert!(commands.is_empty());

        player.fire();
        run(&mut player, 1.0 / 60.0, &mut commands, &mut rng);
        let sent = drain(&mut commands);
        assert_eq!(sent.len(), 2);
        match &sent[0].action {
            CommandAction::SpawnProjectiles(spawns) => {
                assert_eq!(spawns.len(), 1);
                assert_eq!(spawns[0].kind, ProjectileKind::AlliedBullet);
                assert!(spawns[0].velocity.y < 0.0);
                assert!(spawns[0].position.y < 100.0);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(sent[0].category, Category::SCENE_AIR_LAYER);
        assert_eq!(sent[1].category, Category::SOUND_EFFECT);
    }

    #[test]
    fn fire_countdown_throttles_shots() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);

        player.fire();
        run(&mut player, 0.1, &mut commands, &mut rng);
        drain(&mut commands);

        // Interval 1s at level 1 gives 0.5s between shots.
        player.fire();
        run(&mut player, 0.1, &mut commands, &mut rng);
        assert!(commands.is_empty());
    }

    #[test]
    fn spread_level_controls_bullet_count() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        player.increase_spread();
        player.increase_spread();
        player.increase_spread();
        assert_eq!(player.spread_level(), 3);
        assert_eq!(player.bullet_spawns(Vec2::ZERO).len(), 3);
    }

    #[test]
    fn fire_rate_is_capped() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        for _ in 0..20 {
            player.increase_fire_rate();
        }
        assert_eq!(player.fire_rate_level(), 10);
    }

    #[test]
    fn missile_launch_consumes_ammo() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);

        player.launch_missile();
        assert_eq!(player.missile_ammo(), 9);
        run(&mut player, 1.0 / 60.0, &mut commands, &mut rng);
        let sent = drain(&mut commands);
        assert!(sent.iter().any(|c| matches!(
            &c.action,
            CommandAction::SpawnProjectiles(s) if s[0].kind == ProjectileKind::Missile
        )));
        assert!(sent.iter().any(|c| matches!(
            c.action,
            CommandAction::PlaySound { effect: EffectId::LaunchMissile, .. }
        )));
    }

    #[test]
    fn launch_without_ammo_does_nothing() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        for _ in 0..10 {
            player.launch_missile();
        }
        assert_eq!(player.missile_ammo(), 0);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);
        run(&mut player, 1.0 / 60.0, &mut commands, &mut rng);
        drain(&mut commands);

        player.launch_missile();
        run(&mut player, 1.0 / 60.0, &mut commands, &mut rng);
        assert!(commands.is_empty());
    }

    #[test]
    fn enemies_fire_downward_on_their_own() {
        let mut enemy = Aircraft::new(AircraftKind::Raptor);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);
        run(&mut enemy, 1.0 / 60.0, &mut commands, &mut rng);
        let sent = drain(&mut commands);
        match &sent[0].action {
            CommandAction::SpawnProjectiles(spawns) => {
                assert_eq!(spawns[0].kind, ProjectileKind::EnemyBullet);
                assert!(spawns[0].velocity.y > 0.0);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn enemy_follows_movement_pattern() {
        let mut enemy = Aircraft::new(AircraftKind::Raptor);
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(1);
        let step = run(&mut enemy, 0.5, &mut commands, &mut rng);
        // +45 degrees off straight ahead: moving down and to the left.
        assert!(step.y > 0.0);
        assert!(step.x < 0.0);
        assert!((enemy.velocity().length() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn destroyed_aircraft_stops_firing_and_explodes() {
        let mut enemy = Aircraft::new(AircraftKind::Avenger);
        enemy.destroy();
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(9);

        let step = run(&mut enemy, 0.6, &mut commands, &mut rng);
        assert_eq!(step, Vec2::ZERO);
        let sent = drain(&mut commands);
        assert!(
            !sent
                .iter()
                .any(|c| matches!(c.action, CommandAction::SpawnProjectiles(_)))
        );
        assert!(sent.iter().any(|c| matches!(
            c.action,
            CommandAction::PlaySound { effect: EffectId::Explosion1 | EffectId::Explosion2, .. }
        )));
        assert!(!enemy.is_marked_for_removal());

        run(&mut enemy, 0.6, &mut commands, &mut rng);
        let sent = drain(&mut commands);
        assert!(
            !sent
                .iter()
                .any(|c| matches!(c.action, CommandAction::PlaySound { .. })),
            "explosion sound plays once"
        );
        assert!(enemy.is_marked_for_removal());
    }

    #[test]
    fn pickup_drop_is_rolled_once() {
        let mut drops = 0;
        for seed in 0..32 {
            let mut enemy = Aircraft::new(AircraftKind::Raptor);
            enemy.destroy();
            let mut commands = CommandQueue::new();
            let mut rng = Rng::with_seed(seed);
            for _ in 0..10 {
                run(&mut enemy, 0.05, &mut commands, &mut rng);
            }
            drops += drain(&mut commands)
                .iter()
                .filter(|c| matches!(c.action, CommandAction::DropPickup { .. }))
                .count();
        }
        assert!(drops > 0 && drops < 32);
    }

    #[test]
    fn player_never_drops_pickups() {
        let mut player = Aircraft::new(AircraftKind::Eagle);
        player.destroy();
        let mut commands = CommandQueue::new();
        let mut rng = Rng::with_seed(0);
        for _ in 0..10 {
            run(&mut player, 0.05, &mut commands, &mut rng);
        }
        assert!(
            !drain(&mut commands)
                .iter()
                .any(|c| matches!(c.action, CommandAction::DropPickup { .. }))
        );
    }
}
