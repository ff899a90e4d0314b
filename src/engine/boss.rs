//! Attaching a subject's manager one hop up

use crate::directory::{is_valid_manager_reference, normalize_person_name};
use crate::graph::{Graph, Link, Node, NodeKey};
use tracing::{debug, warn};

/// Link `subject` to its manager
///
/// The link targets the manager's own person node when the manager is
/// already in the graph, and a shared `Reports To: <manager>` placeholder
/// otherwise. Exactly one unit-weight link is added per call. A missing or
/// malformed manager reference adds nothing and returns `false`.
pub fn attach_boss(graph: &mut Graph, subject: &NodeKey, manager_ref: &str) -> bool {
    match manager_key(subject, manager_ref) {
        Some(manager) => {
            attach_boss_key(graph, subject, &manager);
            true
        }
        None => false,
    }
}

/// Node key of a manager reference, `None` when it is missing or malformed
pub fn manager_key(subject: &NodeKey, manager_ref: &str) -> Option<String> {
    if manager_ref.trim().is_empty() {
        return None;
    }
    if !is_valid_manager_reference(manager_ref) {
        warn!("Ignoring malformed manager reference {:?} for {}", manager_ref, subject);
        return None;
    }
    Some(normalize_person_name(manager_ref))
}

/// Whether attaching `manager` would add a new placeholder node
pub fn needs_placeholder(graph: &Graph, manager: &str) -> bool {
    !graph.contains_person(manager) && !graph.contains(NodeKey::reports_to(manager).as_str())
}

/// Link `subject` to a manager already in node-key form
pub fn attach_boss_key(graph: &mut Graph, subject: &NodeKey, manager: &str) {
    let target = if graph.contains_person(manager) {
        debug!("{} reports to {} already on screen", subject, manager);
        NodeKey::new(manager)
    } else {
        let placeholder = NodeKey::reports_to(manager);
        graph.add_node(Node::boss(placeholder.clone()));
        placeholder
    };

    graph.add_link(Link::unit(subject.clone(), target));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    #[test]
    fn test_placeholder_node() {
        let mut graph = Graph::new();
        assert!(attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), "E0_Bob_Jones"));

        let boss = graph.node("Reports To: Bob_Jones").unwrap();
        assert_eq!(boss.group, 0);
        assert_eq!(boss.kind, NodeKind::Boss);
        assert!(graph.links()[0].connects("Alice_Smith", "Reports To: Bob_Jones"));
        assert_eq!(graph.links()[0].weight, 1.0);
    }

    #[test]
    fn test_shared_boss_is_added_once() {
        let mut graph = Graph::new();
        attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), "Bob Jones");
        attach_boss(&mut graph, &NodeKey::new("Carol_Lee"), "Bob_Jones");

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_needs_placeholder() {
        let mut graph = Graph::new();
        assert!(needs_placeholder(&graph, "Bob_Jones"));
        attach_boss_key(&mut graph, &NodeKey::new("Alice_Smith"), "Bob_Jones");
        assert!(!needs_placeholder(&graph, "Bob_Jones"));

        graph.add_node(Node::person("Dan_Kim", 1));
        assert!(!needs_placeholder(&graph, "Dan_Kim"));
        assert_eq!(manager_key(&NodeKey::new("Alice_Smith"), "12345"), None);
    }

    #[test]
    fn test_prefers_real_person_node() {
        let mut graph = Graph::new();
        graph.add_node(Node::person("Bob_Jones", 1));
        attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), "E0_Bob_Jones");

        assert!(!graph.contains("Reports To: Bob_Jones"));
        assert!(graph.links()[0].connects("Alice_Smith", "Bob_Jones"));
    }

    #[test]
    fn test_synthetic_node_with_same_name_is_not_a_person() {
        let mut graph = Graph::new();
        graph.add_node(Node::container("Bob_Jones"));
        attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), "Bob_Jones");
        assert!(graph.links()[0].connects("Alice_Smith", "Reports To: Bob_Jones"));
    }

    #[test]
    fn test_malformed_reference_is_skipped() {
        let mut graph = Graph::new();
        assert!(!attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), ""));
        assert!(!attach_boss(&mut graph, &NodeKey::new("Alice_Smith"), "#42"));
        assert!(graph.is_empty());
    }
}
