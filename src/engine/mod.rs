//! Graph construction engine
//!
//! Turns a search term or a clicked node into a bounded `{nodes, links}`
//! graph:
//! - `resolver` maps a term onto zero, one or many identities
//! - `tree` expands the reports-to relation below a root
//! - `boss` attaches the root's manager one hop up
//! - `aggregation` builds the flat view for a skill, position or org unit
//! - `explorer` ties them together per request
//!
//! All mutable state of a pass lives in a [`BuildContext`] created for that
//! pass alone.

pub mod aggregation;
pub mod boss;
pub mod context;
pub mod explorer;
pub mod resolver;
pub mod tree;

pub use aggregation::{build_aggregation, NO_BOSS_FOUND};
pub use boss::{attach_boss, attach_boss_key};
pub use context::BuildContext;
pub use explorer::{Candidate, Explorer, GraphResponse, NodeDetails, ResponseKind};
pub use resolver::{resolve, ResolveResult};
pub use tree::{build_rooted_tree, build_tree};

use crate::directory::DirectoryError;
use thiserror::Error;

/// Engine errors
///
/// Missing, ambiguous and truncated results are outcomes, not errors; only a
/// directory that cannot answer fails a request.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub type EngineResult<T> = Result<T, EngineError>;
