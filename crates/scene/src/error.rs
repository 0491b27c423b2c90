use crate::node::NodeId;

/// Errors from structural scene graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} is not in the scene graph")]
    StaleNode(NodeId),
    #[error("node {child:?} already has parent {parent:?}")]
    AlreadyAttached { child: NodeId, parent: NodeId },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("the root node cannot be attached or detached")]
    RootNode,
    #[error("node {0:?} has no parent")]
    NotAttached(NodeId),
}
