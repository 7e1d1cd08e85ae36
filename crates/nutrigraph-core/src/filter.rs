//! Subgraph filtering with neighbor inclusion.
//!
//! Filtering never orphans edges: the view keeps every link that touches a
//! matching node, and every node at the other end of those links, even when
//! that node does not match the filter itself. Filtering one food group
//! therefore still shows the biomarkers those foods affect.
//!
//! 1. No type restriction and no group: the whole graph (minus links with a
//!    missing endpoint).
//! 2. Otherwise, the primary set is every node matching the type (if
//!    restricted) AND the group (if given).
//! 3. Relevant links are those with at least one endpoint in the primary set.
//! 4. Returned nodes are the primary set plus every endpoint of a relevant
//!    link; returned links are the relevant links.

use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Restriction on node type. `All` means no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Food,
    Biomarker,
}

impl TypeFilter {
    pub fn matches(&self, node_type: NodeType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Food => node_type == NodeType::Food,
            TypeFilter::Biomarker => node_type == NodeType::Biomarker,
        }
    }
}

impl From<NodeType> for TypeFilter {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Food => TypeFilter::Food,
            NodeType::Biomarker => TypeFilter::Biomarker,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(TypeFilter::All),
            other => other.parse::<NodeType>().map(TypeFilter::from),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Food => f.write_str("food"),
            TypeFilter::Biomarker => f.write_str("biomarker"),
        }
    }
}

/// A type/category predicate over nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphFilter {
    #[serde(default, rename = "type")]
    pub node_type: TypeFilter,
    #[serde(default)]
    pub group: Option<String>,
}

impl SubgraphFilter {
    pub fn new(node_type: TypeFilter, group: Option<String>) -> Self {
        Self {
            node_type,
            group: group.filter(|g| !g.is_empty()),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.node_type == TypeFilter::All && self.group.is_none()
    }

    /// Whether a node belongs to the primary set.
    pub fn matches(&self, node: &Node) -> bool {
        self.node_type.matches(node.node_type)
            && self.group.as_deref().map_or(true, |g| node.group == g)
    }

    /// Apply this filter to a graph.
    pub fn apply(&self, graph: &GraphData) -> GraphData {
        filter_subgraph(graph, self)
    }
}

/// Produce the filtered node+link view of `graph`.
pub fn filter_subgraph(graph: &GraphData, filter: &SubgraphFilter) -> GraphData {
    let known: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let resolved =
        |l: &&Link| known.contains(l.source.as_str()) && known.contains(l.target.as_str());

    if filter.is_unrestricted() {
        return GraphData {
            nodes: graph.nodes.clone(),
            links: graph.links.iter().filter(resolved).cloned().collect(),
        };
    }

    let primary: HashSet<&str> = graph
        .nodes
        .iter()
        .filter(|n| filter.matches(n))
        .map(|n| n.id.as_str())
        .collect();

    let links: Vec<Link> = graph
        .links
        .iter()
        .filter(resolved)
        .filter(|l| primary.contains(l.source.as_str()) || primary.contains(l.target.as_str()))
        .cloned()
        .collect();

    let mut visible = primary.clone();
    for link in &links {
        visible.insert(link.source.as_str());
        visible.insert(link.target.as_str());
    }

    let nodes: Vec<Node> = graph
        .nodes
        .iter()
        .filter(|n| visible.contains(n.id.as_str()))
        .cloned()
        .collect();

    debug!(
        filter = %filter.node_type,
        group = ?filter.group,
        primary = primary.len(),
        nodes = nodes.len(),
        links = links.len(),
        "filtered subgraph"
    );

    GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> GraphData {
        GraphData::new(
            vec![
                Node::new("apple", "Apple", NodeType::Food, "Fruits"),
                Node::new("berry", "Blueberry", NodeType::Food, "Fruits"),
                Node::new("oats", "Oats", NodeType::Food, "Grains"),
                Node::new("ldl", "LDL", NodeType::Biomarker, "Lipids"),
                Node::new("glu", "Glucose", NodeType::Biomarker, "Metabolic"),
                Node::new("crp", "CRP", NodeType::Biomarker, "Inflammation"),
            ],
            vec![
                Link::new("apple", "ldl", Effect::Decrease, Strength::Medium),
                Link::new("berry", "glu", Effect::Decrease, Strength::Low),
                Link::new("oats", "crp", Effect::Decrease, Strength::High),
                Link::new("oats", "ldl", Effect::Decrease, Strength::High),
                Link::new("berry", "ghost", Effect::Increase, Strength::Low),
            ],
        )
    }

    #[test]
    fn unrestricted_returns_everything_resolvable() {
        let out = filter_subgraph(&graph(), &SubgraphFilter::all());
        assert_eq!(out.nodes.len(), 6);
        assert_eq!(out.links.len(), 4);
    }

    #[test]
    fn group_filter_includes_linked_neighbors() {
        let filter = SubgraphFilter::new(TypeFilter::Food, Some("Fruits".into()));
        let out = filter_subgraph(&graph(), &filter);

        let ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["apple", "berry", "ldl", "glu"]);
        assert_eq!(out.links.len(), 2);
        assert!(out.links.iter().all(|l| l.source.as_str() != "oats"));
    }

    #[test]
    fn type_only_filter() {
        let out = filter_subgraph(&graph(), &SubgraphFilter::new(TypeFilter::Biomarker, None));
        assert_eq!(out.links.len(), 4);
        assert_eq!(out.nodes.len(), 6);
    }

    #[test]
    fn group_matching_nothing_is_empty() {
        let filter = SubgraphFilter::new(TypeFilter::All, Some("Treats".into()));
        let out = filter_subgraph(&graph(), &filter);
        assert!(out.nodes.is_empty());
        assert!(out.links.is_empty());
    }

    #[test]
    fn type_and_group_are_conjunctive() {
        // "Lipids" is a biomarker group, so restricting to foods matches nothing.
        let filter = SubgraphFilter::new(TypeFilter::Food, Some("Lipids".into()));
        assert!(filter_subgraph(&graph(), &filter).nodes.is_empty());
    }

    #[test]
    fn empty_group_string_means_no_group() {
        let filter = SubgraphFilter::new(TypeFilter::All, Some(String::new()));
        assert!(filter.is_unrestricted());
    }

    #[test]
    fn parse_type_filter() {
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!("Food".parse::<TypeFilter>(), Ok(TypeFilter::Food));
        assert_eq!("".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert!("mineral".parse::<TypeFilter>().is_err());
    }
}
