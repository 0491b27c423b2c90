use serde::Serialize;
use skystrike_common::Category;
use skystrike_kernel::{MissionStatus, World};
use skystrike_scene::{NodeId, NodeKind, SceneGraph};
use std::fmt;

/// World inspector for developer tooling.
///
/// Read-only queries against the running mission for debugging and CLI output.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        let graph = world.graph();
        let player = world.player_aircraft();
        WorldSummary {
            tick: world.tick(),
            seed: world.config().seed,
            status: world.mission_status(),
            node_count: graph.len(),
            enemies_alive: world.active_enemies().len(),
            projectiles: graph.query(Category::PROJECTILE).len(),
            pickups: graph.query(Category::PICKUP).len(),
            pending_spawns: world.pending_spawns().len(),
            pending_commands: world.commands().len(),
            pending_events: world.events().len(),
            player_hitpoints: player.map(|p| p.hitpoints()),
            player_missiles: player.map(|p| p.missile_ammo()),
            view_top: world.view_bounds().top,
        }
    }

    /// Details of one node, or `None` if the handle is stale.
    pub fn inspect_node(world: &World, id: NodeId) -> Option<NodeInfo> {
        let graph = world.graph();
        let node = graph.get(id)?;
        let position = graph.world_position(id)?;
        let hitpoints = match node.kind() {
            NodeKind::Aircraft(a) => Some(a.hitpoints()),
            NodeKind::Projectile(p) => Some(p.hull().hitpoints()),
            NodeKind::Pickup(p) => Some(p.hull().hitpoints()),
            _ => None,
        };
        Some(NodeInfo {
            id,
            kind: kind_label(node.kind()),
            category: node.category().bits(),
            position: [position.x, position.y],
            rotation: node.transform().rotation,
            hitpoints,
            destroyed: node.is_destroyed(),
            children: node.children().len(),
            depth: depth(graph, id),
        })
    }

    /// Every attached node, in traversal order.
    pub fn list_nodes(world: &World) -> Vec<NodeId> {
        world.graph().traverse()
    }

    /// Indented one-line-per-node dump of the scene tree.
    pub fn tree(world: &World) -> String {
        let mut out = String::new();
        for id in Self::list_nodes(world) {
            if let Some(info) = Self::inspect_node(world, id) {
                out.push_str(&"  ".repeat(info.depth));
                out.push_str(&info.to_string());
                out.push('\n');
            }
        }
        out
    }
}

fn kind_label(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Layer(category) => format!("layer {category:?}"),
        NodeKind::Sprite(sprite) => format!("sprite {:?}", sprite.texture),
        NodeKind::Aircraft(a) => format!("aircraft {:?}", a.kind()),
        NodeKind::Projectile(p) => format!("projectile {:?}", p.kind()),
        NodeKind::Pickup(p) => format!("pickup {:?}", p.kind()),
        NodeKind::Emitter(e) => format!("emitter {:?}", e.kind()),
        NodeKind::Particles(s) => format!("particles {:?} ({})", s.kind(), s.len()),
        NodeKind::Sound(s) => format!("sound ({} pending)", s.pending().len()),
    }
}

fn depth(graph: &SceneGraph, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = graph.parent(id);
    while let Some(parent) = current {
        depth += 1;
        current = graph.parent(parent);
    }
    depth
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub seed: u64,
    pub status: MissionStatus,
    pub node_count: usize,
    pub enemies_alive: usize,
    pub projectiles: usize,
    pub pickups: usize,
    pub pending_spawns: usize,
    pub pending_commands: usize,
    pub pending_events: usize,
    pub player_hitpoints: Option<i32>,
    pub player_missiles: Option<u32>,
    pub view_top: f32,
}

impl fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "World: tick={} seed={} status={:?} nodes={} enemies={} projectiles={} pickups={} pending_spawns={}",
            self.tick,
            self.seed,
            self.status,
            self.node_count,
            self.enemies_alive,
            self.projectiles,
            self.pickups,
            self.pending_spawns
        )?;
        if let Some(hp) = self.player_hitpoints {
            write!(f, " player_hp={hp}")?;
        }
        Ok(())
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub kind: String,
    pub category: u32,
    pub position: [f32; 2],
    pub rotation: f32,
    pub hitpoints: Option<i32>,
    pub destroyed: bool,
    pub children: usize,
    pub depth: usize,
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} pos=({:.1}, {:.1})",
            self.id, self.kind, self.position[0], self.position[1]
        )?;
        if let Some(hp) = self.hitpoints {
            write!(f, " hp={hp}")?;
        }
        if self.destroyed {
            f.write_str(" destroyed")?;
        }
        Ok(())
    }
}
