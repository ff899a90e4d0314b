//! Node/link accumulator filled by one graph-construction pass

use super::link::Link;
use super::node::Node;
use super::types::NodeKey;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// The `{nodes, links}` structure handed to the renderer
///
/// Nodes are an insertion-ordered set keyed by id: no two nodes share an id
/// and the first insertion wins. Links are a plain sequence and may repeat
/// when the same pair is discovered along several paths.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    #[serde(serialize_with = "serialize_nodes")]
    nodes: IndexMap<NodeKey, Node>,
    links: Vec<Link>,
}

fn serialize_nodes<S: Serializer>(
    nodes: &IndexMap<NodeKey, Node>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.values())
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same id exists
    ///
    /// Returns `true` if the node was added. An existing node keeps its
    /// original group and kind.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// True if `id` is present as a real identity, not a synthetic node
    pub fn contains_person(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(Node::is_person)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Drop every node and link
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut graph = Graph::new();
        assert!(graph.add_node(Node::person("Carol_Lee", 2)));
        assert!(!graph.add_node(Node::person("Carol_Lee", 4)));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("Carol_Lee").unwrap().group, 2);
    }

    #[test]
    fn test_links_are_not_deduplicated() {
        let mut graph = Graph::new();
        graph.add_link(Link::unit("Eve_Young", "Carol_Lee"));
        graph.add_link(Link::unit("Eve_Young", "Carol_Lee"));
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_contains_person() {
        let mut graph = Graph::new();
        graph.add_node(Node::person("Alice_Smith", 0));
        graph.add_node(Node::container("Rust"));

        assert!(graph.contains_person("Alice_Smith"));
        assert!(graph.contains("Rust"));
        assert!(!graph.contains_person("Rust"));
        assert!(!graph.contains_person("Bob_Jones"));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut graph = Graph::new();
        graph.add_node(Node::boss("Reports To: Bob_Jones"));
        graph.add_node(Node::person("Alice_Smith", 1));
        graph.add_link(Link::unit("Alice_Smith", "Reports To: Bob_Jones"));

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [
                    {"id": "Reports To: Bob_Jones", "group": 0},
                    {"id": "Alice_Smith", "group": 1}
                ],
                "links": [
                    {"source": "Alice_Smith", "target": "Reports To: Bob_Jones", "value": 1.0}
                ]
            })
        );
    }

    #[test]
    fn test_clear() {
        let mut graph = Graph::new();
        graph.add_node(Node::person("Alice_Smith", 0));
        graph.add_link(Link::unit("Alice_Smith", "Bob_Jones"));
        graph.clear();
        assert!(graph.is_empty());
    }
}
