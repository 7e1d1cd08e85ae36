//! GraphStore - the immutable node/link snapshot with id lookup.
//!
//! The store accepts data as-is: nodes without links, links whose
//! endpoints are missing, and duplicate ids are all kept. Lookups resolve
//! to the first node carrying an id. Links with an unresolved endpoint are
//! filtered out at point of use through [`GraphStore::resolved_links`].

use crate::types::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Read-only snapshot of the evidence graph.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    data: GraphData,
    /// Map from node id to its position in `data.nodes` (first occurrence).
    index: HashMap<NodeId, usize>,
}

impl GraphStore {
    pub fn new(data: GraphData) -> Self {
        let mut index = HashMap::with_capacity(data.nodes.len());
        let mut duplicates = 0usize;
        for (i, node) in data.nodes.iter().enumerate() {
            if index.contains_key(&node.id) {
                duplicates += 1;
                warn!(id = %node.id, "duplicate node id; first occurrence wins");
                continue;
            }
            index.insert(node.id.clone(), i);
        }

        let store = Self { data, index };
        let dangling = store.data.links.len() - store.resolved_links().count();
        debug!(
            nodes = store.data.nodes.len(),
            links = store.data.links.len(),
            dangling,
            duplicates,
            "graph store built"
        );
        store
    }

    /// Look up a node by id.
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.data.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes as loaded, duplicates included.
    pub fn nodes(&self) -> &[Node] {
        &self.data.nodes
    }

    /// All links as loaded, dangling ones included.
    pub fn links(&self) -> &[Link] {
        &self.data.links
    }

    /// Links whose source and target both resolve to a node.
    pub fn resolved_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.data
            .links
            .iter()
            .filter(|l| self.contains(l.source.as_str()) && self.contains(l.target.as_str()))
    }

    pub fn foods(&self) -> impl Iterator<Item = &Node> + '_ {
        self.data.nodes.iter().filter(|n| n.is_food())
    }

    pub fn biomarkers(&self) -> impl Iterator<Item = &Node> + '_ {
        self.data.nodes.iter().filter(|n| n.is_biomarker())
    }

    /// Look up a node only if it is a food.
    pub fn food(&self, id: &str) -> Option<&Node> {
        self.node_by_id(id).filter(|n| n.is_food())
    }

    /// Label of a node, falling back to its id.
    pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.node_by_id(id).map(|n| n.label.as_str()).unwrap_or(id)
    }

    pub fn node_count(&self) -> usize {
        self.data.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.data.links.len()
    }

    /// The raw payload this store was built from.
    pub fn data(&self) -> &GraphData {
        &self.data
    }
}

impl From<GraphData> for GraphStore {
    fn from(data: GraphData) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GraphData {
        GraphData::new(
            vec![
                Node::new("oats", "Oats", NodeType::Food, "Grains"),
                Node::new("ldl", "LDL Cholesterol", NodeType::Biomarker, "Lipids"),
                Node::new("oats", "Oat Bran", NodeType::Food, "Grains"),
                Node::new("kale", "Kale", NodeType::Food, "Vegetables"),
            ],
            vec![
                Link::new("oats", "ldl", Effect::Decrease, Strength::High),
                Link::new("ghost", "ldl", Effect::Decrease, Strength::Low),
                Link::new("oats", "missing", Effect::Increase, Strength::Low),
            ],
        )
    }

    #[test]
    fn first_duplicate_wins() {
        let store = GraphStore::new(sample());
        assert_eq!(store.node_by_id("oats").unwrap().label, "Oats");
        assert_eq!(store.node_count(), 4);
    }

    #[test]
    fn dangling_links_are_kept_but_not_resolved() {
        let store = GraphStore::new(sample());
        assert_eq!(store.link_count(), 3);
        let resolved: Vec<_> = store.resolved_links().collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].source.as_str(), "oats");
    }

    #[test]
    fn food_lookup_respects_type() {
        let store = GraphStore::new(sample());
        assert!(store.food("oats").is_some());
        assert!(store.food("ldl").is_none());
        assert!(store.food("nope").is_none());
    }

    #[test]
    fn label_falls_back_to_id() {
        let store = GraphStore::new(sample());
        assert_eq!(store.label_of("ldl"), "LDL Cholesterol");
        assert_eq!(store.label_of("ghost"), "ghost");
    }

    #[test]
    fn empty_store() {
        let store = GraphStore::default();
        assert_eq!(store.node_count(), 0);
        assert!(store.node_by_id("x").is_none());
        assert_eq!(store.resolved_links().count(), 0);
    }
}
