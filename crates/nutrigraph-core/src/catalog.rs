//! Catalog queries - search, node details, evidence listings and
//! dashboard statistics over a loaded [`GraphStore`].
//!
//! Every query here only sees resolved links.

use crate::connectivity::ConnectivityIndex;
use crate::store::GraphStore;
use crate::types::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A node together with every resolved link that touches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetails {
    pub node: Node,
    pub links: Vec<Link>,
}

/// One row of a food's or biomarker's evidence listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceEntry {
    /// The node at the other end of the link.
    pub counterpart: Node,
    pub effect: Effect,
    pub strength: Strength,
    pub magnitude: String,
    pub timeframe: String,
    pub summary: String,
    pub citations: Vec<Citation>,
}

/// A group name with how many nodes belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub group: String,
    pub count: usize,
}

/// A node ranked by how many links it has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub node: Node,
    pub count: usize,
}

/// Headline numbers for the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub biomarkers: usize,
    pub foods: usize,
    pub links: usize,
    /// Distinct cited papers, by title.
    pub papers: usize,
    pub high_strength: usize,
    /// Percent of links with at least one citation.
    pub citation_coverage: u32,
    pub food_groups: usize,
    pub biomarker_groups: usize,
    pub avg_links_per_biomarker: f64,
    pub avg_links_per_food: f64,
    /// Percent of links rated high strength.
    pub evidence_ratio: u32,
}

/// Nodes whose label contains `query`, case-insensitive. An empty query
/// matches everything.
pub fn search<'a>(store: &'a GraphStore, query: &str) -> Vec<&'a Node> {
    let q = query.trim().to_lowercase();
    store
        .nodes()
        .iter()
        .filter(|n| n.label.to_lowercase().contains(&q))
        .collect()
}

/// Like [`search`], but also matches on group name.
pub fn search_with_group<'a>(store: &'a GraphStore, query: &str) -> Vec<&'a Node> {
    let q = query.trim().to_lowercase();
    store
        .nodes()
        .iter()
        .filter(|n| n.label.to_lowercase().contains(&q) || n.group.to_lowercase().contains(&q))
        .collect()
}

pub fn node_details(store: &GraphStore, id: &str) -> Option<NodeDetails> {
    let node = store.node_by_id(id)?.clone();
    let links = store
        .resolved_links()
        .filter(|l| l.touches(id))
        .cloned()
        .collect();
    Some(NodeDetails { node, links })
}

/// Biomarkers affected by a food, strongest evidence first.
pub fn food_evidence(store: &GraphStore, food_id: &str) -> Vec<EvidenceEntry> {
    evidence(store, |l| l.source.as_str() == food_id, |l| &l.target)
}

/// Foods affecting a biomarker, strongest evidence first.
pub fn biomarker_evidence(store: &GraphStore, biomarker_id: &str) -> Vec<EvidenceEntry> {
    evidence(store, |l| l.target.as_str() == biomarker_id, |l| &l.source)
}

fn evidence<F, C>(store: &GraphStore, select: F, counterpart: C) -> Vec<EvidenceEntry>
where
    F: Fn(&Link) -> bool,
    C: Fn(&Link) -> &NodeId,
{
    let mut entries: Vec<EvidenceEntry> = store
        .resolved_links()
        .filter(|l| select(l))
        .filter_map(|l| {
            let other = store.node_by_id(counterpart(l).as_str())?;
            Some(EvidenceEntry {
                counterpart: other.clone(),
                effect: l.effect.clone(),
                strength: l.strength.clone(),
                magnitude: l.magnitude.clone(),
                timeframe: l.timeframe.clone(),
                summary: l.summary.clone(),
                citations: l.citations.clone(),
            })
        })
        .collect();
    // Stable: equal strengths keep link order.
    entries.sort_by_key(|e| e.strength.rank());
    entries
}

/// Distinct groups of a node type, sorted by name, with member counts.
pub fn groups(store: &GraphStore, node_type: NodeType) -> Vec<GroupCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for node in store.nodes().iter().filter(|n| n.node_type == node_type) {
        *counts.entry(node.group.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(group, count)| GroupCount {
            group: group.to_string(),
            count,
        })
        .collect()
}

/// Most-connected nodes of a type. Ties break by id.
pub fn top_connected(
    store: &GraphStore,
    index: &ConnectivityIndex,
    node_type: NodeType,
    n: usize,
) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = store
        .nodes()
        .iter()
        .filter(|node| node.node_type == node_type)
        .map(|node| RankedNode {
            node: node.clone(),
            count: index.connectivity_count(node.id.as_str()),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.node.id.cmp(&b.node.id)));
    ranked.truncate(n);
    ranked
}

/// Biomarkers with the most incoming links, as quick picks for a query.
pub fn quick_biomarkers(store: &GraphStore, n: usize) -> Vec<RankedNode> {
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    for link in store.resolved_links() {
        *incoming.entry(link.target.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<RankedNode> = store
        .biomarkers()
        .map(|b| RankedNode {
            node: b.clone(),
            count: incoming.get(b.id.as_str()).copied().unwrap_or(0),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.node.id.cmp(&b.node.id)));
    ranked.truncate(n);
    ranked
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

pub fn catalog_stats(store: &GraphStore) -> CatalogStats {
    let biomarkers = store.biomarkers().count();
    let foods = store.foods().count();
    let links: Vec<&Link> = store.resolved_links().collect();

    let papers: HashSet<&str> = links
        .iter()
        .flat_map(|l| l.citations.iter().map(|c| c.title.as_str()))
        .collect();
    let high_strength = links.iter().filter(|l| l.strength == Strength::High).count();
    let cited = links.iter().filter(|l| !l.citations.is_empty()).count();
    let food_groups: HashSet<&str> = store.foods().map(|n| n.group.as_str()).collect();
    let biomarker_groups: HashSet<&str> = store.biomarkers().map(|n| n.group.as_str()).collect();

    CatalogStats {
        biomarkers,
        foods,
        links: links.len(),
        papers: papers.len(),
        high_strength,
        citation_coverage: percent(cited, links.len()),
        food_groups: food_groups.len(),
        biomarker_groups: biomarker_groups.len(),
        avg_links_per_biomarker: ratio(links.len(), biomarkers),
        avg_links_per_food: ratio(links.len(), foods),
        evidence_ratio: percent(high_strength, links.len()),
    }
}
