//! Visualization graph data model
//!
//! The `{nodes, links}` product consumed by the renderer:
//! - Nodes keyed by a rendering-stable id, deduplicated on insert
//! - Directed, weighted links, duplicates allowed
//! - Traversal limits bounding one construction pass

pub mod accumulator;
pub mod budget;
pub mod link;
pub mod node;
pub mod types;

// Re-export main types
pub use accumulator::Graph;
pub use budget::{TraversalBudget, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
pub use link::Link;
pub use node::{Node, NodeKind};
pub use types::{NodeKey, REPORTS_TO_PREFIX};
