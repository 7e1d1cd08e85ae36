//! Shared types for the food/biomarker evidence graph.
//!
//! These mirror the JSON served by the graph endpoint: `{ nodes, links }`.
//! Deserialization is lenient where the upstream data is loose: optional
//! text fields default to empty, unknown `effect`/`strength` strings are
//! kept verbatim, and link endpoints may arrive either as a bare id or as
//! an already-resolved node object. A node, link or citation that still
//! cannot be read is skipped with a warning; the rest of the graph loads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Unique identifier of a node in the evidence graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The two disjoint node partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Food,
    Biomarker,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Food => "food",
            NodeType::Biomarker => "biomarker",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(NodeType::Food),
            "biomarker" => Ok(NodeType::Biomarker),
            other => Err(format!("unknown node type: {other}")),
        }
    }
}

/// A food or biomarker entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Category, e.g. "Lipids" or "Grains".
    #[serde(default, deserialize_with = "nullable_string")]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Node {
    pub fn new(id: &str, label: &str, node_type: NodeType, group: &str) -> Self {
        Self {
            id: NodeId::new(id),
            label: label.to_string(),
            node_type,
            group: group.to_string(),
            description: None,
        }
    }

    pub fn is_food(&self) -> bool {
        self.node_type == NodeType::Food
    }

    pub fn is_biomarker(&self) -> bool {
        self.node_type == NodeType::Biomarker
    }
}

/// Direction a caller wants a biomarker to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    #[default]
    Decrease,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Increase => "increase",
            Direction::Decrease => "decrease",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" | "up" | "+" => Ok(Direction::Increase),
            "decrease" | "down" | "-" => Ok(Direction::Decrease),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Direction of change a food induces in a biomarker.
///
/// Anything other than `increase`/`decrease` is preserved as `Other` and
/// never matches a desired [`Direction`]. A missing or null effect reads as
/// `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Effect {
    Increase,
    Decrease,
    Other(String),
}

impl Effect {
    /// Whether this effect moves the biomarker the way the caller wants.
    pub fn matches(&self, desired: Direction) -> bool {
        matches!(
            (self, desired),
            (Effect::Increase, Direction::Increase) | (Effect::Decrease, Direction::Decrease)
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Effect::Increase => "increase",
            Effect::Decrease => "decrease",
            Effect::Other(s) => s,
        }
    }
}

impl From<String> for Effect {
    fn from(s: String) -> Self {
        match s.as_str() {
            "increase" => Effect::Increase,
            "decrease" => Effect::Decrease,
            _ => Effect::Other(s),
        }
    }
}

impl From<Option<String>> for Effect {
    fn from(s: Option<String>) -> Self {
        s.map(Effect::from).unwrap_or_default()
    }
}

impl Default for Effect {
    fn default() -> Self {
        Effect::Other(String::new())
    }
}

impl From<Effect> for String {
    fn from(e: Effect) -> Self {
        match e {
            Effect::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl From<Direction> for Effect {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Increase => Effect::Increase,
            Direction::Decrease => Effect::Decrease,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative confidence rating of a link's evidence. A missing or null
/// rating reads as `Other("")` and weighs like `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Strength {
    High,
    Medium,
    Low,
    Other(String),
}

impl Strength {
    /// Numeric weight used by the scorer. Unrecognized ratings count as low.
    pub fn weight(&self) -> f64 {
        match self {
            Strength::High => 3.0,
            Strength::Medium => 2.0,
            Strength::Low | Strength::Other(_) => 1.0,
        }
    }

    /// Sort rank for evidence listings: high first, unrecognized last.
    pub fn rank(&self) -> u8 {
        match self {
            Strength::High => 0,
            Strength::Medium => 1,
            Strength::Low => 2,
            Strength::Other(_) => 3,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Strength::High => "high",
            Strength::Medium => "medium",
            Strength::Low => "low",
            Strength::Other(s) => s,
        }
    }
}

impl From<String> for Strength {
    fn from(s: String) -> Self {
        match s.as_str() {
            "high" => Strength::High,
            "medium" => Strength::Medium,
            "low" => Strength::Low,
            _ => Strength::Other(s),
        }
    }
}

impl From<Option<String>> for Strength {
    fn from(s: Option<String>) -> Self {
        s.map(Strength::from).unwrap_or_default()
    }
}

impl Default for Strength {
    fn default() -> Self {
        Strength::Other(String::new())
    }
}

impl From<Strength> for String {
    fn from(s: Strength) -> Self {
        match s {
            Strength::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A publication backing a link. Passed through untouched.
///
/// Older datasets store some citations as a bare title string; those read
/// as a title-only citation with year 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CitationRecord")]
pub struct Citation {
    pub title: String,
    pub year: i32,
    /// Raw identifier: a DOI, a `pmid:` token, or a bare URL.
    pub doi: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CitationRecord {
    Title(String),
    Full {
        #[serde(default, deserialize_with = "nullable_string")]
        title: String,
        #[serde(default, deserialize_with = "nullable_year")]
        year: i32,
        #[serde(default, deserialize_with = "nullable_string")]
        doi: String,
        #[serde(rename = "type", default, deserialize_with = "nullable_string")]
        kind: String,
    },
}

impl From<CitationRecord> for Citation {
    fn from(record: CitationRecord) -> Self {
        match record {
            CitationRecord::Title(title) => Citation {
                title,
                year: 0,
                doi: String::new(),
                kind: String::new(),
            },
            CitationRecord::Full {
                title,
                year,
                doi,
                kind,
            } => Citation {
                title,
                year,
                doi,
                kind,
            },
        }
    }
}

/// Directed, evidence-rated edge from a food to a biomarker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(deserialize_with = "endpoint_id")]
    pub source: NodeId,
    #[serde(deserialize_with = "endpoint_id")]
    pub target: NodeId,
    #[serde(default)]
    pub effect: Effect,
    #[serde(default)]
    pub strength: Strength,
    #[serde(default, deserialize_with = "nullable_string")]
    pub magnitude: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub timeframe: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub citations: Vec<Citation>,
}

impl Link {
    pub fn new(source: &str, target: &str, effect: Effect, strength: Strength) -> Self {
        Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
            effect,
            strength,
            magnitude: String::new(),
            timeframe: String::new(),
            summary: String::new(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    /// Whether `id` is either endpoint.
    pub fn touches(&self, id: &str) -> bool {
        self.source.as_str() == id || self.target.as_str() == id
    }
}

/// The raw graph payload: `{ nodes, links }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub links: Vec<Link>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    /// Visible (food, biomarker) counts.
    pub fn type_counts(&self) -> TypeCounts {
        let foods = self.nodes.iter().filter(|n| n.is_food()).count();
        TypeCounts {
            foods,
            biomarkers: self.nodes.len() - foods,
        }
    }
}

/// Node counts per partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub foods: usize,
    pub biomarkers: usize,
}

/// Accepts `"id"` or `{ "id": "...", ... }` and normalizes to the id.
fn endpoint_id<'de, D>(deserializer: D) -> Result<NodeId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Endpoint {
        Id(String),
        Resolved { id: String },
    }

    Ok(match Endpoint::deserialize(deserializer)? {
        Endpoint::Id(id) | Endpoint::Resolved { id } => NodeId(id),
    })
}

/// A null or missing list is empty; elements that fail to parse are
/// skipped with a warning instead of failing the whole document.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index = i, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    if items.len() < total {
        warn!(kept = items.len(), total, "dropped malformed records");
    }
    Ok(items)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_accepts_id_or_object() {
        let json = r#"{
            "source": {"id": "oats", "label": "Oats", "x": 1.5},
            "target": "ldl",
            "effect": "decrease",
            "strength": "high"
        }"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.source, NodeId::new("oats"));
        assert_eq!(link.target, NodeId::new("ldl"));
        assert!(link.citations.is_empty());
        assert!(link.summary.is_empty());
    }

    #[test]
    fn unknown_strength_and_effect_are_preserved() {
        let json = r#"{"source":"a","target":"b","effect":"stabilize","strength":"very high"}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.effect, Effect::Other("stabilize".into()));
        assert_eq!(link.strength, Strength::Other("very high".into()));
        assert_eq!(link.strength.weight(), 1.0);
        assert!(!link.effect.matches(Direction::Increase));
        assert!(!link.effect.matches(Direction::Decrease));

        let back = serde_json::to_value(&link).unwrap();
        assert_eq!(back["strength"], "very high");
        assert_eq!(back["effect"], "stabilize");
    }

    #[test]
    fn node_type_field_is_named_type() {
        let json =
            r#"{"id":"b12","label":"Vitamin B12","type":"biomarker","group":"Vitamins","val":4}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.is_biomarker());
        assert_eq!(node.description, None);
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"], "biomarker");
    }

    #[test]
    fn null_citations_become_empty() {
        let json =
            r#"{"source":"a","target":"b","effect":"increase","strength":"low","citations":null}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert!(link.citations.is_empty());
    }

    #[test]
    fn missing_effect_and_strength_read_as_unknown() {
        let link: Link = serde_json::from_str(r#"{"source":"a","target":"b"}"#).unwrap();
        assert_eq!(link.effect, Effect::default());
        assert_eq!(link.strength, Strength::Other(String::new()));
        assert_eq!(link.strength.weight(), 1.0);
        assert!(!link.effect.matches(Direction::Decrease));

        let json = r#"{"source":"a","target":"b","effect":null,"strength":null,"summary":null}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.effect, Effect::Other(String::new()));
        assert!(link.summary.is_empty());
    }

    #[test]
    fn citation_tolerates_null_year_and_bare_titles() {
        let json = r#"{
            "source": "a",
            "target": "b",
            "effect": "decrease",
            "strength": "high",
            "citations": [
                {"title": "Oat beta-glucan and LDL", "year": null, "doi": "10.1/x"},
                "Whole grains review",
                42
            ]
        }"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.citations.len(), 2);
        assert_eq!(link.citations[0].year, 0);
        assert_eq!(link.citations[0].doi, "10.1/x");
        assert_eq!(link.citations[1].title, "Whole grains review");
        assert!(link.citations[1].doi.is_empty());
    }

    #[test]
    fn malformed_records_are_skipped() {
        let json = r#"{
            "nodes": [
                {"id": "oats", "label": "Oats", "type": "food"},
                {"id": "mystery", "type": "mineral"},
                {"id": "ldl", "label": "LDL", "type": "biomarker"}
            ],
            "links": [
                {"target": "ldl", "effect": "decrease", "strength": "high"},
                {"source": "oats", "target": "ldl", "effect": "decrease", "strength": "high"}
            ]
        }"#;
        let data: GraphData = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["oats", "ldl"]);
        assert_eq!(data.links.len(), 1);
        assert_eq!(data.links[0].source, NodeId::new("oats"));
    }

    #[test]
    fn strength_weights() {
        assert_eq!(Strength::High.weight(), 3.0);
        assert_eq!(Strength::Medium.weight(), 2.0);
        assert_eq!(Strength::Low.weight(), 1.0);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("Increase".parse::<Direction>(), Ok(Direction::Increase));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Decrease));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::default(), Direction::Decrease);
    }

    #[test]
    fn type_counts_split_partitions() {
        let data = GraphData::new(
            vec![
                Node::new("f1", "Oats", NodeType::Food, "Grains"),
                Node::new("f2", "Kale", NodeType::Food, "Vegetables"),
                Node::new("b1", "LDL", NodeType::Biomarker, "Lipids"),
            ],
            vec![],
        );
        assert_eq!(data.type_counts(), TypeCounts { foods: 2, biomarkers: 1 });
    }
}
