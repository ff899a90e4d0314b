//! Directory records read by the engine

use super::normalize::normalize_person_name;
use crate::graph::NodeKey;
use serde::{Deserialize, Serialize};

/// A hierarchy entry: one person and whom they report to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub unique_id: String,

    /// Display name, `"First Last"`
    pub full_name: String,

    /// Reference to the manager's identity, absent for the top of the tree
    pub manager_name: Option<String>,

    pub title: String,
    pub location: String,
    pub org_unit: String,
}

impl Identity {
    pub fn new(unique_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Identity {
            unique_id: unique_id.into(),
            full_name: full_name.into(),
            manager_name: None,
            title: String::new(),
            location: String::new(),
            org_unit: String::new(),
        }
    }

    pub fn with_manager(mut self, manager_name: impl Into<String>) -> Self {
        self.manager_name = Some(manager_name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_org_unit(mut self, org_unit: impl Into<String>) -> Self {
        self.org_unit = org_unit.into();
        self
    }

    /// Node id of this person in a rendered graph
    pub fn node_key(&self) -> NodeKey {
        NodeKey::new(normalize_person_name(&self.full_name))
    }
}

/// User-maintained extra data about a person, keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRecord {
    pub user: String,
    pub position: String,
    pub email: String,
    pub skills: String,
    pub team_description: String,
    pub distros: String,
    pub sharepoints: String,
}

impl CustomRecord {
    pub fn new(user: impl Into<String>) -> Self {
        CustomRecord {
            user: user.into(),
            ..Default::default()
        }
    }

    /// Name-only identity; the manager has to be looked up in the hierarchy
    pub fn as_identity(&self) -> Identity {
        Identity::new(self.user.clone(), self.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key() {
        let alice = Identity::new("E1_Alice_Smith", "Alice Smith").with_manager("E0_Bob_Jones");
        assert_eq!(alice.node_key().as_str(), "Alice_Smith");
        assert_eq!(alice.manager_name.as_deref(), Some("E0_Bob_Jones"));
    }

    #[test]
    fn test_custom_record_as_identity() {
        let mut record = CustomRecord::new("Carol_Lee");
        record.skills = "Rust, SQL".to_string();

        let identity = record.as_identity();
        assert_eq!(identity.node_key().as_str(), "Carol_Lee");
        assert!(identity.manager_name.is_none());
    }
}
