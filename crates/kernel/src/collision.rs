//! Gameplay response to overlapping entities.
//!
//! Rules are tried in order and the first match wins:
//! 1. player aircraft × enemy aircraft: the player takes the enemy's
//!    remaining hitpoints as damage, the enemy is destroyed.
//! 2. player aircraft × pickup: the pickup's effect is applied, the pickup is
//!    destroyed and a collect sound is queued at the player.
//! 3. enemy aircraft × player projectile, or player aircraft × enemy
//!    projectile: the aircraft takes the projectile's damage, the projectile
//!    is destroyed.
//!
//! Every other pairing is ignored.

use serde::{Deserialize, Serialize};
use skystrike_common::{Category, EffectId};
use skystrike_scene::{Command, CommandQueue, Node, NodeId, Pair, PickupKind, SceneGraph};

/// What a resolved collision did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Rammed {
        player: NodeId,
        enemy: NodeId,
        damage: i32,
    },
    Collected {
        player: NodeId,
        pickup: NodeId,
        kind: PickupKind,
    },
    Hit {
        aircraft: NodeId,
        projectile: NodeId,
        damage: i32,
    },
}

/// True when the pair's categories match `(first, second)` in either order.
/// On a reversed match the pair is swapped so `pair.first` matches `first`.
pub fn matches_categories(graph: &SceneGraph, pair: &mut Pair, first: Category, second: Category) -> bool {
    let category_of = |id| graph.get(id).map(Node::category).unwrap_or(Category::NONE);
    let a = category_of(pair.first);
    let b = category_of(pair.second);

    if first.intersects(a) && second.intersects(b) {
        true
    } else if first.intersects(b) && second.intersects(a) {
        std::mem::swap(&mut pair.first, &mut pair.second);
        true
    } else {
        false
    }
}

/// Detect every overlapping pair in `graph` and apply the collision rules.
pub fn handle_collisions(graph: &mut SceneGraph, commands: &mut CommandQueue) -> Vec<Resolution> {
    let _span = tracing::debug_span!("handle_collisions").entered();
    let pairs = graph.check_scene_collision();
    let mut resolved = Vec::new();

    for mut pair in pairs {
        let resolution = if matches_categories(graph, &mut pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT) {
            ram(graph, pair.first, pair.second)
        } else if matches_categories(graph, &mut pair, Category::PLAYER_AIRCRAFT, Category::PICKUP) {
            collect(graph, commands, pair.first, pair.second)
        } else if matches_categories(graph, &mut pair, Category::ENEMY_AIRCRAFT, Category::PLAYER_PROJECTILE)
            || matches_categories(graph, &mut pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_PROJECTILE)
        {
            hit(graph, pair.first, pair.second)
        } else {
            None
        };

        if let Some(resolution) = resolution {
            tracing::debug!(?resolution, "collision resolved");
            resolved.push(resolution);
        }
    }
    resolved
}

fn ram(graph: &mut SceneGraph, player: NodeId, enemy: NodeId) -> Option<Resolution> {
    let damage = graph.get(enemy)?.as_aircraft()?.hitpoints();
    graph.get_mut(player)?.as_aircraft_mut()?.damage(damage);
    graph.get_mut(enemy)?.destroy();
    Some(Resolution::Rammed { player, enemy, damage })
}

fn collect(graph: &mut SceneGraph, commands: &mut CommandQueue, player: NodeId, pickup: NodeId) -> Option<Resolution> {
    let kind = graph.get(pickup)?.as_pickup()?.kind();
    let position = graph.world_position(player)?;
    kind.apply(graph.get_mut(player)?.as_aircraft_mut()?);
    graph.get_mut(pickup)?.destroy();
    commands.push(Command::play_sound(EffectId::CollectPickup, position));
    Some(Resolution::Collected { player, pickup, kind })
}

fn hit(graph: &mut SceneGraph, aircraft: NodeId, projectile: NodeId) -> Option<Resolution> {
    let damage = graph.get(projectile)?.as_projectile()?.damage();
    graph.get_mut(aircraft)?.as_aircraft_mut()?.damage(damage);
    graph.get_mut(projectile)?.destroy();
    Some(Resolution::Hit {
        aircraft,
        projectile,
        damage,
    })
}
