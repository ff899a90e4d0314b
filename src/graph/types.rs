//! Core type definitions for the visualization graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Prefix of the synthetic node that stands in for a manager outside the tree
pub const REPORTS_TO_PREFIX: &str = "Reports To: ";

/// Rendering-stable node identifier
///
/// Either a person's normalized name (`Alice_Smith`) or a synthetic label
/// such as `Reports To: Bob_Jones` or a quoted org unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        NodeKey(key.into())
    }

    /// Key of the synthetic "reports to" node for a normalized manager name
    pub fn reports_to(manager: &str) -> Self {
        NodeKey(format!("{}{}", REPORTS_TO_PREFIX, manager))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The manager name carried by a synthetic "reports to" key
    pub fn reported_manager(&self) -> Option<&str> {
        self.0.strip_prefix(REPORTS_TO_PREFIX)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey(s)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey(s.to_string())
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
