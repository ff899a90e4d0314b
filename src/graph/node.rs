//! Node implementation for the visualization graph

use super::types::NodeKey;
use serde::{Deserialize, Serialize};

/// What a node stands for
///
/// Only `Person` nodes are real identities; the others are synthetic and
/// cannot be resolved back to a single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NodeKind {
    /// A directory identity keyed by its normalized name
    #[default]
    Person,
    /// Placeholder for a manager that is not part of the tree
    Boss,
    /// Container for an aggregation over a skill, position or org unit
    Container,
}

/// A node in the visualization graph
///
/// Serialized as `{id, group}`; `kind` is bookkeeping for the builders and is
/// never sent to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Rendering-stable identifier
    pub id: NodeKey,

    /// Depth tier from the root, used for visual grouping only
    pub group: u32,

    #[serde(skip)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeKey>, group: u32, kind: NodeKind) -> Self {
        Node {
            id: id.into(),
            group,
            kind,
        }
    }

    pub fn person(id: impl Into<NodeKey>, group: u32) -> Self {
        Self::new(id, group, NodeKind::Person)
    }

    pub fn boss(id: impl Into<NodeKey>) -> Self {
        Self::new(id, 0, NodeKind::Boss)
    }

    pub fn container(id: impl Into<NodeKey>) -> Self {
        Self::new(id, 0, NodeKind::Container)
    }

    pub fn is_person(&self) -> bool {
        self.kind == NodeKind::Person
    }
}
