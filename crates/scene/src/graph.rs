//! Arena-backed scene graph.
//!
//! # Invariants
//! - Every node has at most one parent; a child's lifetime is bounded by its
//!   parent's. Removing a node frees its whole subtree.
//! - `world_transform(node) = world_transform(parent) * local_transform(node)`.
//!   World transforms are derived on demand and never stored.
//! - Traversal order is pre-order with children in insertion order, so every
//!   pass is deterministic.

use glam::{Affine2, Vec2};
use skystrike_common::{Category, Rect, Rng, Transform, distance};

use crate::command::{Command, CommandAction, CommandQueue, ProjectileSpawn};
use crate::data::{ParticleKind, PickupKind};
use crate::error::SceneError;
use crate::node::{Node, NodeId, NodeKind, UpdateContext};
use crate::particles::Emitter;
use crate::pickup::Pickup;
use crate::projectile::Projectile;

/// Vertical speed of freshly dropped pickups.
const PICKUP_DRIFT: Vec2 = Vec2::new(0.0, 1.0);

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owns every node. Parent/child relations are handle pairs; the root is a
/// category-less layer created with the graph.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 0),
            live: 0,
        };
        graph.root = graph.insert(NodeKind::Layer(Category::NONE), Transform::default());
        graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, attached or not, including the root.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Create a detached node. It takes part in no traversal until attached.
    pub fn insert(&mut self, kind: NodeKind, transform: Transform) -> NodeId {
        let node = Node::new(kind, transform);
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        }
    }

    /// Transfer ownership of `child` to `parent`, appending it to the
    /// parent's children.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        let existing = self.get(child).ok_or(SceneError::StaleNode(child))?.parent;
        if let Some(existing) = existing {
            return Err(SceneError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Insert a node and attach it under `parent` in one step.
    pub fn spawn(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        let id = self.insert(kind, transform);
        self.attach_child(parent, id)?;
        Ok(id)
    }

    /// Detach `child` from its parent. The node (and its subtree) stays in
    /// the arena with its local transform unchanged.
    pub fn detach_child(&mut self, child: NodeId) -> Result<(), SceneError> {
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        let parent = self
            .get(child)
            .ok_or(SceneError::StaleNode(child))?
            .parent
            .ok_or(SceneError::NotAttached(child))?;
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Detach a node and free it together with its subtree. Returns the
    /// number of nodes freed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(id) {
            return Err(SceneError::StaleNode(id));
        }
        if self.parent(id).is_some() {
            self.detach_child(id)?;
        }
        Ok(self.free_subtree(id))
    }

    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(current) = stack.pop() {
            let index = current.index() as usize;
            let Some(slot) = self
                .slots
                .get_mut(index)
                .filter(|slot| slot.generation == current.generation())
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index());
                self.live -= 1;
                freed += 1;
                stack.extend(node.children);
            }
        }
        freed
    }

    /// True when `ancestor` lies strictly above `node` in the tree.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Composition of every local transform from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine2> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            chain.push(node.transform.to_affine());
            current = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Affine2::IDENTITY, |world, local| world * *local),
        )
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        self.world_transform(id).map(|t| t.translation)
    }

    /// World-space bounding box of an entity; `None` for nodes without bounds.
    pub fn bounding_rect(&self, id: NodeId) -> Option<Rect> {
        let local = self.get(id)?.local_bounds()?;
        Some(local.transformed(&self.world_transform(id)?))
    }

    /// All nodes reachable from the root, pre-order, children in insertion order.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.live);
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Every attached node whose category intersects `category`.
    pub fn query(&self, category: Category) -> Vec<NodeId> {
        self.traverse()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| n.category().intersects(category)))
            .collect()
    }

    /// Like [`query`](Self::query), skipping destroyed entities.
    pub fn query_alive(&self, category: Category) -> Vec<NodeId> {
        self.query(category)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| !n.is_destroyed()))
            .collect()
    }

    pub fn find_first(&self, category: Category) -> Option<NodeId> {
        self.query(category).into_iter().next()
    }

    /// Run every node's behavior once, parents before children. Commands
    /// pushed here are delivered on the next drain.
    pub fn update(&mut self, dt: f32, commands: &mut CommandQueue, rng: &mut Rng) {
        let mut ctx = UpdateContext { dt, commands, rng };
        self.update_node(self.root, Affine2::IDENTITY, &mut ctx);
    }

    fn update_node(&mut self, id: NodeId, parent_world: Affine2, ctx: &mut UpdateContext<'_>) {
        let world = match self.get_mut(id) {
            Some(node) => {
                let position = (parent_world * node.transform.to_affine()).translation;
                node.update_current(position, ctx);
                parent_world * node.transform.to_affine()
            }
            None => return,
        };

        let mut index = 0;
        while let Some(child) = self.get(id).and_then(|n| n.children.get(index).copied()) {
            self.update_node(child, world, ctx);
            index += 1;
        }
    }

    /// Apply `command` to every attached node whose category intersects the
    /// command's category. Returns the number of nodes it ran on.
    ///
    /// Targets are resolved before any of them runs, so nodes created by the
    /// command itself are not visited.
    pub fn on_command(&mut self, command: &Command) -> usize {
        let targets = self.query(command.category);
        let enemies = match command.action {
            CommandAction::GuideMissiles => self
                .query_alive(Category::ENEMY_AIRCRAFT)
                .into_iter()
                .filter_map(|id| self.world_position(id))
                .collect(),
            _ => Vec::new(),
        };

        for id in &targets {
            self.apply(*id, &command.action, &enemies);
        }
        tracing::trace!(category = ?command.category, targets = targets.len(), "command applied");
        targets.len()
    }

    fn apply(&mut self, id: NodeId, action: &CommandAction, enemies: &[Vec2]) {
        match action {
            CommandAction::Accelerate(delta) => {
                if let Some(aircraft) = self.get_mut(id).and_then(Node::as_aircraft_mut) {
                    aircraft.accelerate(*delta);
                }
            }
            CommandAction::Fire => {
                if let Some(aircraft) = self.get_mut(id).and_then(Node::as_aircraft_mut) {
                    aircraft.fire();
                }
            }
            CommandAction::LaunchMissile => {
                if let Some(aircraft) = self.get_mut(id).and_then(Node::as_aircraft_mut) {
                    aircraft.launch_missile();
                }
            }
            CommandAction::GuideMissiles => self.guide_missile(id, enemies),
            CommandAction::DestroyOutside(bounds) => {
                let outside = self
                    .bounding_rect(id)
                    .is_some_and(|rect| !bounds.intersects(&rect));
                if outside {
                    if let Some(node) = self.get_mut(id) {
                        node.destroy();
                    }
                }
            }
            CommandAction::SpawnProjectiles(spawns) => {
                for spawn in spawns {
                    if let Err(err) = self.spawn_projectile(id, spawn) {
                        tracing::warn!(%err, "projectile spawn dropped");
                    }
                }
            }
            CommandAction::DropPickup { kind, position } => {
                if let Err(err) = self.spawn_pickup(id, *kind, *position) {
                    tracing::warn!(%err, "pickup spawn dropped");
                }
            }
            CommandAction::EmitParticles {
                kind,
                position,
                count,
            } => self.emit_particles(id, *kind, *position, *count),
            CommandAction::PlaySound { effect, position } => {
                if let Some(sound) = self.get_mut(id).and_then(Node::as_sound_mut) {
                    sound.play(*effect, *position);
                }
            }
        }
    }

    /// Point a guided projectile at the nearest of `enemies`. The first of
    /// several equally close enemies wins. Bullets and an empty enemy list
    /// leave the projectile untouched.
    fn guide_missile(&mut self, id: NodeId, enemies: &[Vec2]) {
        let Some(position) = self.world_position(id) else {
            return;
        };
        let Some(projectile) = self.get_mut(id).and_then(Node::as_projectile_mut) else {
            return;
        };
        if !projectile.is_guided() {
            return;
        }

        let mut closest = None;
        let mut min_distance = f32::MAX;
        for &enemy in enemies {
            let d = distance(position, enemy);
            if d < min_distance {
                min_distance = d;
                closest = Some(enemy);
            }
        }
        if let Some(target) = closest {
            projectile.guide_towards(position, target);
        }
    }

    /// Convert a world position into `parent`'s local space.
    fn to_local(&self, parent: NodeId, world: Vec2) -> Vec2 {
        self.world_transform(parent)
            .map(|t| t.inverse().transform_point2(world))
            .unwrap_or(world)
    }

    fn spawn_projectile(&mut self, layer: NodeId, spawn: &ProjectileSpawn) -> Result<NodeId, SceneError> {
        let mut projectile = Projectile::new(spawn.kind);
        projectile.set_velocity(spawn.velocity);
        let guided = projectile.is_guided();
        let tail = Vec2::new(0.0, projectile.local_bounds().height / 2.0);

        let local = self.to_local(layer, spawn.position);
        let id = self.spawn(layer, NodeKind::Projectile(projectile), Transform::at(local))?;
        if guided {
            for kind in [ParticleKind::Smoke, ParticleKind::Propellant] {
                self.spawn(id, NodeKind::Emitter(Emitter::new(kind)), Transform::at(tail))?;
            }
        }
        Ok(id)
    }

    fn spawn_pickup(&mut self, layer: NodeId, kind: PickupKind, position: Vec2) -> Result<NodeId, SceneError> {
        let mut pickup = Pickup::new(kind);
        pickup.hull_mut().velocity = PICKUP_DRIFT;
        let local = self.to_local(layer, position);
        self.spawn(layer, NodeKind::Pickup(pickup), Transform::at(local))
    }

    fn emit_particles(&mut self, id: NodeId, kind: ParticleKind, position: Vec2, count: u32) {
        if let Some(NodeKind::Particles(system)) = self.get_mut(id).map(Node::kind_mut) {
            if system.kind() == kind {
                for _ in 0..count {
                    system.add_particle(position);
                }
            }
        }
    }

    /// Free every node marked for removal together with its subtree.
    /// Children are cleaned before their parent is examined. Returns the
    /// number of nodes freed.
    pub fn remove_wrecks(&mut self) -> usize {
        let removed = self.remove_wrecks_below(self.root);
        if removed > 0 {
            tracing::debug!(removed, "wrecks removed");
        }
        removed
    }

    fn remove_wrecks_below(&mut self, id: NodeId) -> usize {
        let children = self.children(id).to_vec();
        let mut removed = 0;
        for child in &children {
            removed += self.remove_wrecks_below(*child);
        }

        let wrecks: Vec<NodeId> = children
            .into_iter()
            .filter(|c| self.get(*c).is_some_and(Node::is_marked_for_removal))
            .collect();
        if wrecks.is_empty() {
            return removed;
        }
        if let Some(node) = self.get_mut(id) {
            node.children.retain(|c| !wrecks.contains(c));
        }
        for wreck in wrecks {
            removed += self.free_subtree(wreck);
        }
        removed
    }
}
