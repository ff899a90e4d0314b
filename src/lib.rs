//! Orgraph
//!
//! Builds bounded, renderable org chart graphs from a directory of people.
//! A search term or a clicked node becomes a `{nodes, links}` graph: either
//! the reporting tree below a person, or a flat grouping of everyone sharing
//! a skill, position or org unit.
//!
//! # Layout
//!
//! - `graph`: the node/link product and traversal limits
//! - `directory`: the read-only identity store and its backends
//! - `engine`: resolution, tree and aggregation builders, the per-request explorer
//! - `http`: JSON API over the explorer
//! - `config`: YAML configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use orgraph::{EngineConfig, Explorer, Identity, MemoryDirectory, ResponseKind};
//! use std::sync::Arc;
//!
//! let mut directory = MemoryDirectory::new();
//! directory.insert(Identity::new("E1", "Ann Lee"));
//! directory.insert(Identity::new("E2", "Bob Ray").with_manager("Ann Lee"));
//!
//! let explorer = Explorer::new(Arc::new(directory), EngineConfig::default());
//! let response = explorer.search("Ann Lee").unwrap();
//!
//! assert_eq!(response.kind, ResponseKind::Tree);
//! assert_eq!(response.graph.node_count(), 2);
//! assert!(!response.truncated);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod directory;
pub mod engine;
pub mod graph;
pub mod http;

// Re-export main types for convenience
pub use config::{ConfigError, DirectoryConfig, EngineConfig, OrgraphConfig, ServerConfig};

pub use directory::{
    CustomRecord, DirectoryError, DirectoryResult, DirectoryStore, Field, Identity,
    MemoryDirectory, SqliteDirectory, Table,
};

pub use engine::{
    BuildContext, Candidate, EngineError, EngineResult, Explorer, GraphResponse, NodeDetails,
    ResolveResult, ResponseKind,
};

pub use graph::{Graph, Link, Node, NodeKey, NodeKind, TraversalBudget};

pub use http::HttpServer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
