//! Traversal limits for one graph-construction pass

/// Default degrees of separation shown below the root
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Default ceiling on nodes on screen at once
pub const DEFAULT_MAX_NODES: usize = 100;

/// Depth and node-count ceiling bounding one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalBudget {
    /// Nodes at this group are added but not expanded
    pub max_depth: u32,

    /// Total node ceiling, synthetic nodes included
    pub max_node_count: usize,
}

impl Default for TraversalBudget {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_node_count: DEFAULT_MAX_NODES,
        }
    }
}

impl TraversalBudget {
    pub fn new(max_depth: u32, max_node_count: usize) -> Self {
        Self {
            max_depth,
            max_node_count,
        }
    }

    /// Whether a node at `group` may be expanded with `node_count` nodes on screen
    pub fn allows_expansion(&self, group: u32, node_count: usize) -> bool {
        group < self.max_depth && node_count < self.max_node_count
    }

    pub fn has_room(&self, node_count: usize) -> bool {
        node_count < self.max_node_count
    }

    /// Whether `extra` more nodes fit next to `node_count` existing ones
    pub fn fits(&self, node_count: usize, extra: usize) -> bool {
        node_count + extra <= self.max_node_count
    }
}
