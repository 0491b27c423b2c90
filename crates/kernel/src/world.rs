use glam::Vec2;
use serde::{Deserialize, Serialize};
use skystrike_common::{Category, Rect, Rng, TextureId, Transform};
use skystrike_scene::{
    Aircraft, AircraftKind, Canvas, Command, CommandAction, CommandQueue, NodeId, NodeKind,
    ParticleKind, ParticleSystem, SceneGraph, SoundSink, Sprite,
};
use std::time::Duration;

use crate::audio::AudioSink;
use crate::collision::{Resolution, handle_collisions};
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::spawn::{SpawnPoint, SpawnTable};

/// Height of the finish line strip drawn above the level.
const FINISH_LINE_HEIGHT: f32 = 76.0;
/// Enemies face down the screen.
const ENEMY_ROTATION: f32 = 180.0;

/// A record of something notable the world did during an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// An enemy left the spawn list and entered the scene.
    EnemySpawned {
        id: NodeId,
        kind: AircraftKind,
        position: Vec2,
    },
    Collision(Resolution),
    /// Destroyed entities were freed from the scene.
    WrecksRemoved { count: usize },
    /// One frame finished.
    Stepped { tick: u64 },
}

/// Outcome of the mission so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    Running,
    Success,
    Failure,
}

/// Scene layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayers {
    /// Scrolling backdrop and finish line.
    pub background: NodeId,
    /// Projectiles, pickups and particle systems.
    pub lower_air: NodeId,
    /// Aircraft.
    pub upper_air: NodeId,
}

/// The running mission.
///
/// Owns the scene graph, the command queue and the camera. Each call to
/// [`update`](Self::update) advances the whole simulation by one fixed step.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    graph: SceneGraph,
    layers: SceneLayers,
    sound: NodeId,
    commands: CommandQueue,
    view_center: Vec2,
    world_bounds: Rect,
    spawn_points: Vec<SpawnPoint>,
    rng: Rng,
    tick: u64,
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Build the scene for `config` with the enemies of `table`.
    pub fn new(config: WorldConfig, table: &SpawnTable) -> Result<Self, WorldError> {
        config.validate()?;

        let view = config.view_size;
        let world_bounds = Rect::new(0.0, 0.0, view.x, config.world_height);
        let spawn_position = config.spawn_position();

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let background = graph.spawn(root, NodeKind::Layer(Category::NONE), Transform::default())?;
        let lower_air = graph.spawn(
            root,
            NodeKind::Layer(Category::SCENE_AIR_LAYER),
            Transform::default(),
        )?;
        let upper_air = graph.spawn(root, NodeKind::Layer(Category::NONE), Transform::default())?;
        let sound = graph.spawn(root, NodeKind::Sound(SoundSink::default()), Transform::default())?;

        // The backdrop reaches one view above the level so the top edge
        // never shows.
        graph.spawn(
            background,
            NodeKind::Sprite(Sprite {
                texture: TextureId::Jungle,
                region: Rect::new(0.0, 0.0, world_bounds.width, world_bounds.height + view.y),
            }),
            Transform::at(Vec2::new(world_bounds.left, world_bounds.top - view.y)),
        )?;
        graph.spawn(
            background,
            NodeKind::Sprite(Sprite {
                texture: TextureId::FinishLine,
                region: Rect::new(0.0, 0.0, view.x, FINISH_LINE_HEIGHT),
            }),
            Transform::at(Vec2::new(0.0, -FINISH_LINE_HEIGHT)),
        )?;

        for kind in [ParticleKind::Smoke, ParticleKind::Propellant] {
            graph.spawn(
                lower_air,
                NodeKind::Particles(ParticleSystem::new(kind)),
                Transform::default(),
            )?;
        }

        let mut player = Aircraft::new(AircraftKind::Eagle);
        player.set_velocity(Vec2::new(0.0, config.scroll_speed));
        graph.spawn(upper_air, NodeKind::Aircraft(player), Transform::at(spawn_position))?;

        let spawn_points = table.spawn_points(spawn_position);
        tracing::info!(
            enemies = spawn_points.len(),
            seed = config.seed,
            "world built"
        );

        Ok(Self {
            rng: Rng::with_seed(config.seed),
            config,
            graph,
            layers: SceneLayers {
                background,
                lower_air,
                upper_air,
            },
            sound,
            commands: CommandQueue::new(),
            view_center: spawn_position,
            world_bounds,
            spawn_points,
            tick: 0,
            event_log: Vec::new(),
        })
    }

    /// Default config with the stock mission.
    pub fn standard() -> Result<Self, WorldError> {
        Self::new(WorldConfig::default(), &SpawnTable::standard())
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn layers(&self) -> SceneLayers {
        self.layers
    }

    /// Queue that input handlers push player commands into. Everything
    /// queued is delivered during the next update.
    pub fn commands_mut(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    pub fn commands(&self) -> &CommandQueue {
        &self.commands
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    pub fn view_center(&self) -> Vec2 {
        self.view_center
    }

    /// The area currently on screen.
    pub fn view_bounds(&self) -> Rect {
        Rect::from_min_size(self.view_center - self.config.view_size / 2.0, self.config.view_size)
    }

    /// The view extended upward by the battlefield margin. Enemies spawn as
    /// soon as their point enters it and entities outside it are destroyed.
    pub fn battlefield_bounds(&self) -> Rect {
        let mut bounds = self.view_bounds();
        bounds.top -= self.config.battlefield_margin;
        bounds.height += self.config.battlefield_margin;
        bounds
    }

    /// Enemies not yet spawned, nearest last.
    pub fn pending_spawns(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    /// The player's aircraft node, if it is still in the scene.
    pub fn player(&self) -> Option<NodeId> {
        self.graph.find_first(Category::PLAYER_AIRCRAFT)
    }

    pub fn player_aircraft(&self) -> Option<&Aircraft> {
        self.player()
            .and_then(|id| self.graph.get(id))
            .and_then(|node| node.as_aircraft())
    }

    pub fn player_aircraft_mut(&mut self) -> Option<&mut Aircraft> {
        let id = self.player()?;
        self.graph.get_mut(id)?.as_aircraft_mut()
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player().and_then(|id| self.graph.world_position(id))
    }

    /// Enemy aircraft that are not destroyed.
    pub fn active_enemies(&self) -> Vec<NodeId> {
        self.graph.query_alive(Category::ENEMY_AIRCRAFT)
    }

    /// False once the player's explosion has finished (or the player is gone).
    pub fn has_alive_player(&self) -> bool {
        self.player()
            .and_then(|id| self.graph.get(id))
            .is_some_and(|node| !node.is_marked_for_removal())
    }

    /// True once the player has flown out of the level.
    pub fn has_player_reached_end(&self) -> bool {
        self.player_position()
            .is_some_and(|position| !self.world_bounds.contains(position))
    }

    pub fn mission_status(&self) -> MissionStatus {
        if !self.has_alive_player() {
            MissionStatus::Failure
        } else if self.has_player_reached_end() {
            MissionStatus::Success
        } else {
            MissionStatus::Running
        }
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Hand every visible node to `canvas`, back to front.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.graph.draw(canvas);
    }

    /// Advance the mission by one step of `dt`.
    ///
    /// Commands queued before the call (player input) and during the previous
    /// update are delivered first. Commands produced by entity behavior in
    /// this update are delivered on the next one.
    pub fn update(&mut self, dt: Duration, audio: &mut dyn AudioSink) {
        let _span = tracing::debug_span!("world_update", tick = self.tick).entered();
        let seconds = dt.as_secs_f32();

        self.view_center.y += self.config.scroll_speed * seconds;

        if let Some(aircraft) = self.player_aircraft_mut() {
            aircraft.set_velocity(Vec2::ZERO);
        }

        self.destroy_entities_outside_view();
        self.guide_missiles();

        let mut delivered = 0;
        while !self.commands.is_empty() {
            let command = self.commands.pop();
            self.graph.on_command(&command);
            delivered += 1;
        }
        tracing::trace!(delivered, "commands drained");

        self.adapt_player_velocity();

        let removed = self.graph.remove_wrecks();
        if removed > 0 {
            self.event_log.push(WorldEvent::WrecksRemoved { count: removed });
        }

        for resolution in handle_collisions(&mut self.graph, &mut self.commands) {
            self.event_log.push(WorldEvent::Collision(resolution));
        }

        self.spawn_enemies();

        self.graph.update(seconds, &mut self.commands, &mut self.rng);

        self.adapt_player_position();
        self.update_sounds(audio);

        self.tick += 1;
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }

    fn destroy_entities_outside_view(&mut self) {
        self.commands.push(Command::new(
            Category::PROJECTILE | Category::ENEMY_AIRCRAFT,
            CommandAction::DestroyOutside(self.battlefield_bounds()),
        ));
    }

    fn guide_missiles(&mut self) {
        self.commands.push(Command::new(
            Category::PLAYER_PROJECTILE,
            CommandAction::GuideMissiles,
        ));
    }

    /// Diagonal input is slowed by √2, then the scroll speed is added so the
    /// player keeps pace with the view.
    fn adapt_player_velocity(&mut self) {
        let scroll = Vec2::new(0.0, self.config.scroll_speed);
        let Some(aircraft) = self.player_aircraft_mut() else {
            return;
        };
        let velocity = aircraft.velocity();
        if velocity.x != 0.0 && velocity.y != 0.0 {
            aircraft.set_velocity(velocity / std::f32::consts::SQRT_2);
        }
        aircraft.accelerate(scroll);
    }

    fn spawn_enemies(&mut self) {
        let top = self.battlefield_bounds().top;
        while let Some(next) = self.spawn_points.last().copied() {
            if next.y <= top {
                break;
            }
            self.spawn_points.pop();

            let transform = Transform {
                rotation: ENEMY_ROTATION,
                ..Transform::at(next.position())
            };
            match self.graph.spawn(
                self.layers.upper_air,
                NodeKind::Aircraft(Aircraft::new(next.kind)),
                transform,
            ) {
                Ok(id) => {
                    tracing::debug!(?id, kind = ?next.kind, x = next.x, y = next.y, "enemy spawned");
                    self.event_log.push(WorldEvent::EnemySpawned {
                        id,
                        kind: next.kind,
                        position: next.position(),
                    });
                }
                Err(err) => tracing::warn!(%err, "enemy spawn dropped"),
            }
        }
    }

    /// Keep the player inside the view, `border_distance` away from its edges.
    fn adapt_player_position(&mut self) {
        let view = self.view_bounds();
        let border = self.config.border_distance;
        let Some(player) = self.player() else {
            return;
        };
        let Some(node) = self.graph.get_mut(player) else {
            return;
        };
        let position = &mut node.transform_mut().position;
        position.x = position.x.max(view.left + border).min(view.right() - border);
        position.y = position.y.max(view.top + border).min(view.bottom() - border);
    }

    fn update_sounds(&mut self, audio: &mut dyn AudioSink) {
        if let Some(sink) = self.graph.get_mut(self.sound).and_then(|n| n.as_sound_mut()) {
            for request in sink.take_pending() {
                audio.play(request.effect, request.position);
            }
        }
        if let Some(position) = self.player_position() {
            audio.set_listener_position(position);
        }
        audio.remove_stopped_sounds();
    }
}
