//! Connectivity index - degree counts and one-hop neighbor sets.
//!
//! Built from the resolved links of a [`GraphStore`] using petgraph's
//! undirected `Graph`, with a HashMap from node id to petgraph index.
//! Direction is ignored: a link (u, v) makes u and v neighbors of each
//! other. Links with a missing endpoint never enter the index.

use crate::store::GraphStore;
use crate::types::NodeId;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;
use std::collections::{HashMap, HashSet};

/// Derived adjacency over the evidence graph.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityIndex {
    /// Edge weight is the link's position in the store's link list.
    graph: Graph<NodeId, usize, Undirected>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl ConnectivityIndex {
    pub fn build(store: &GraphStore) -> Self {
        let mut graph = Graph::new_undirected();
        let mut node_index = HashMap::with_capacity(store.node_count());

        for node in store.nodes() {
            if !node_index.contains_key(&node.id) {
                let idx = graph.add_node(node.id.clone());
                node_index.insert(node.id.clone(), idx);
            }
        }

        for (i, link) in store.links().iter().enumerate() {
            let (Some(&src), Some(&tgt)) = (
                node_index.get(link.source.as_str()),
                node_index.get(link.target.as_str()),
            ) else {
                continue;
            };
            graph.add_edge(src, tgt, i);
        }

        Self { graph, node_index }
    }

    /// Number of resolved links incident to `id`. Unknown ids count 0.
    pub fn connectivity_count(&self, id: &str) -> usize {
        self.node_index
            .get(id)
            .map(|&idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    /// Incident-link count for every node with at least one link.
    pub fn counts(&self) -> HashMap<NodeId, usize> {
        self.node_index
            .iter()
            .filter_map(|(id, &idx)| {
                let n = self.graph.edges(idx).count();
                (n > 0).then(|| (id.clone(), n))
            })
            .collect()
    }

    /// The node itself plus every node one link away, in either direction.
    ///
    /// Returns an empty set for ids that are not in the graph.
    pub fn neighbors_of(&self, id: &str) -> HashSet<NodeId> {
        let Some(&idx) = self.node_index.get(id) else {
            return HashSet::new();
        };
        let mut ids: HashSet<NodeId> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].clone())
            .collect();
        ids.insert(self.graph[idx].clone());
        ids
    }

    /// Positions (in the store's link list) of resolved links touching `id`.
    pub fn incident_links(&self, id: &str) -> Vec<usize> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };
        let mut positions: Vec<usize> = self.graph.edges(idx).map(|e| *e.weight()).collect();
        positions.sort_unstable();
        positions
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
