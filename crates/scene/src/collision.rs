//! Pairwise overlap detection over the whole tree.

use serde::{Deserialize, Serialize};
use skystrike_common::Rect;
use std::collections::BTreeSet;

use crate::graph::SceneGraph;
use crate::node::NodeId;

/// Unordered pair of colliding nodes, stored with `first < second` so each
/// overlap appears once regardless of discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub first: NodeId,
    pub second: NodeId,
}

impl Pair {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.first == id || self.second == id
    }
}

impl SceneGraph {
    /// Every pair of live, attached entities whose world bounding boxes
    /// overlap. A node is never paired with itself or with one of its own
    /// ancestors or descendants.
    pub fn check_scene_collision(&self) -> BTreeSet<Pair> {
        let candidates: Vec<(NodeId, Rect)> = self
            .traverse()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|n| !n.is_destroyed()))
            .filter_map(|id| Some((id, self.bounding_rect(id)?)))
            .filter(|(_, rect)| !rect.is_empty())
            .collect();

        let mut pairs = BTreeSet::new();
        for (i, (a, rect_a)) in candidates.iter().enumerate() {
            for (b, rect_b) in &candidates[i + 1..] {
                if !rect_a.intersects(rect_b) {
                    continue;
                }
                if self.is_ancestor(*a, *b) || self.is_ancestor(*b, *a) {
                    continue;
                }
                pairs.insert(Pair::new(*a, *b));
            }
        }
        pairs
    }
}
