//! Directed link between two graph nodes

use super::types::NodeKey;
use serde::{Deserialize, Serialize};

/// A directed link
///
/// Hierarchical descent links point from a report to their manager and pull
/// weaker the deeper they sit; boss and aggregation links always weigh `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Node the link starts FROM
    pub source: NodeKey,

    /// Node the link points TO
    pub target: NodeKey,

    /// Attraction strength, serialized as `value` for the renderer
    #[serde(rename = "value")]
    pub weight: f64,
}

impl Link {
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>, weight: f64) -> Self {
        Link {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Link from a report discovered under a parent at `parent_group`
    ///
    /// A root at group 0 is treated as group 1 so the weight stays finite.
    pub fn descent(source: impl Into<NodeKey>, target: impl Into<NodeKey>, parent_group: u32) -> Self {
        Self::new(source, target, 1.0 / f64::from(parent_group.max(1)))
    }

    /// Unit-weight link used for boss and membership edges
    pub fn unit(source: impl Into<NodeKey>, target: impl Into<NodeKey>) -> Self {
        Self::new(source, target, 1.0)
    }

    /// Check if this link goes FROM `source` TO `target`
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source.as_str() == source && self.target.as_str() == target
    }
}
