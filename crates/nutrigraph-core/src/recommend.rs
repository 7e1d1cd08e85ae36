//! Recommendation scoring - rank foods against target biomarkers.
//!
//! For each target biomarker and each link into it from a food:
//! - beneficial links (effect equals the desired direction) add
//!   `strength_weight * beneficial_weight`
//! - conflicting links subtract `strength_weight * conflict_weight`
//!
//! Per food the raw score is then adjusted:
//!
//! ```text
//! final = raw + coverage * coverage_bonus
//!             + min(evidence, evidence_cap) * evidence_bonus
//!             - conflicts * conflict_penalty
//! ```
//!
//! Foods with no matching link are never scored. Ties on the final score
//! are broken by food id so the ranking is deterministic.

use crate::store::GraphStore;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Coefficients of the scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub beneficial_weight: f64,
    pub conflict_weight: f64,
    pub coverage_bonus: f64,
    pub evidence_bonus: f64,
    pub evidence_cap: usize,
    pub conflict_penalty: f64,
    /// How many foods-to-limit to return.
    pub limit_preview: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            beneficial_weight: 2.6,
            conflict_weight: 1.7,
            coverage_bonus: 1.6,
            evidence_bonus: 0.25,
            evidence_cap: 8,
            conflict_penalty: 0.8,
            limit_preview: 6,
        }
    }
}

/// Which biomarkers to target, and which way each should move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendQuery {
    /// Ordered; duplicates are ignored after the first.
    pub targets: Vec<NodeId>,
    /// Missing entries fall back to `default_direction`.
    #[serde(default)]
    pub directions: HashMap<NodeId, Direction>,
    #[serde(default)]
    pub default_direction: Direction,
}

impl RecommendQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target with an explicit direction.
    pub fn target(mut self, id: impl Into<NodeId>, direction: Direction) -> Self {
        let id = id.into();
        self.directions.insert(id.clone(), direction);
        self.targets.push(id);
        self
    }

    /// Add a target that uses the default direction.
    pub fn target_default(mut self, id: impl Into<NodeId>) -> Self {
        self.targets.push(id.into());
        self
    }

    pub fn direction_for(&self, id: &str) -> Direction {
        self.directions
            .get(id)
            .copied()
            .unwrap_or(self.default_direction)
    }

    /// Targets with duplicates removed, first occurrence kept.
    pub fn unique_targets(&self) -> Vec<&NodeId> {
        let mut seen = HashSet::new();
        self.targets.iter().filter(|t| seen.insert(*t)).collect()
    }
}

/// One link between a recommended food and a target biomarker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomarkerMatch {
    pub biomarker_id: NodeId,
    /// Biomarker label, for display.
    pub biomarker: String,
    pub effect: Effect,
    pub strength: Strength,
    pub magnitude: String,
    pub timeframe: String,
    pub summary: String,
    pub beneficial: bool,
}

/// A scored food.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodRecommendation {
    pub food: Node,
    pub final_score: f64,
    /// Sum of per-link contributions before coverage/evidence/conflict terms.
    pub raw_score: f64,
    pub coverage_count: usize,
    pub coverage_pct: u32,
    /// Total citations across matched links (not deduplicated).
    pub evidence_count: usize,
    pub beneficial_count: usize,
    pub conflict_count: usize,
    pub matches: Vec<BiomarkerMatch>,
}

/// Ranked output of [`recommend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationSet {
    /// Foods with a positive final score, best first.
    pub recommendations: Vec<FoodRecommendation>,
    /// Non-positive foods with at least one conflict, truncated.
    pub foods_to_limit: Vec<FoodRecommendation>,
}

/// Aggregate view of a recommendation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    /// Mean coverage percent over recommendations, rounded.
    pub avg_coverage: u32,
    /// Highest evidence count among recommendations.
    pub top_evidence: usize,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty() && self.foods_to_limit.is_empty()
    }

    pub fn summary(&self) -> RecommendationSummary {
        let recs = &self.recommendations;
        if recs.is_empty() {
            return RecommendationSummary::default();
        }
        let total: u32 = recs.iter().map(|r| r.coverage_pct).sum();
        RecommendationSummary {
            avg_coverage: (total as f64 / recs.len() as f64).round() as u32,
            top_evidence: recs.iter().map(|r| r.evidence_count).max().unwrap_or(0),
        }
    }
}

#[derive(Default)]
struct Tally {
    score: f64,
    beneficial: usize,
    conflicts: usize,
    evidence: usize,
    covered: HashSet<NodeId>,
    matches: Vec<BiomarkerMatch>,
}

/// Score every food against the query with default weights.
pub fn recommend(store: &GraphStore, query: &RecommendQuery) -> RecommendationSet {
    recommend_with(store, query, &ScoringWeights::default())
}

/// Score every food against the query.
pub fn recommend_with(
    store: &GraphStore,
    query: &RecommendQuery,
    weights: &ScoringWeights,
) -> RecommendationSet {
    let ranked = score_foods(store, query, weights);

    let recommendations: Vec<FoodRecommendation> =
        ranked.iter().filter(|r| r.final_score > 0.0).cloned().collect();
    let foods_to_limit: Vec<FoodRecommendation> = ranked
        .into_iter()
        .filter(|r| r.final_score <= 0.0 && r.conflict_count > 0)
        .take(weights.limit_preview)
        .collect();

    RecommendationSet {
        recommendations,
        foods_to_limit,
    }
}

/// Every food with at least one matching link, sorted best first.
pub fn score_foods(
    store: &GraphStore,
    query: &RecommendQuery,
    weights: &ScoringWeights,
) -> Vec<FoodRecommendation> {
    let targets = query.unique_targets();
    if targets.is_empty() {
        return Vec::new();
    }

    let mut tallies: HashMap<&NodeId, Tally> = HashMap::new();

    for target in &targets {
        let Some(biomarker) = store.node_by_id(target.as_str()) else {
            continue;
        };
        let desired = query.direction_for(target.as_str());

        for link in store.links().iter().filter(|l| &l.target == *target) {
            let Some(food) = store.food(link.source.as_str()) else {
                continue;
            };

            let beneficial = link.effect.matches(desired);
            let weight = link.strength.weight();
            let contribution = if beneficial {
                weight * weights.beneficial_weight
            } else {
                -weight * weights.conflict_weight
            };

            let tally = tallies.entry(&food.id).or_default();
            tally.score += contribution;
            tally.covered.insert((*target).clone());
            tally.evidence += link.citations.len();
            if beneficial {
                tally.beneficial += 1;
            } else {
                tally.conflicts += 1;
            }
            tally.matches.push(BiomarkerMatch {
                biomarker_id: biomarker.id.clone(),
                biomarker: biomarker.label.clone(),
                effect: link.effect.clone(),
                strength: link.strength.clone(),
                magnitude: link.magnitude.clone(),
                timeframe: link.timeframe.clone(),
                summary: link.summary.clone(),
                beneficial,
            });
        }
    }

    let target_count = targets.len() as f64;
    let mut ranked: Vec<FoodRecommendation> = tallies
        .into_iter()
        .filter_map(|(food_id, tally)| {
            let food = store.node_by_id(food_id.as_str())?.clone();
            let coverage_count = tally.covered.len();
            let coverage_pct = ((coverage_count as f64 / target_count) * 100.0).round() as u32;
            let final_score = tally.score
                + coverage_count as f64 * weights.coverage_bonus
                + tally.evidence.min(weights.evidence_cap) as f64 * weights.evidence_bonus
                - tally.conflicts as f64 * weights.conflict_penalty;

            Some(FoodRecommendation {
                food,
                final_score,
                raw_score: tally.score,
                coverage_count,
                coverage_pct,
                evidence_count: tally.evidence,
                beneficial_count: tally.beneficial,
                conflict_count: tally.conflicts,
                matches: tally.matches,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.food.id.cmp(&b.food.id))
    });

    debug!(
        targets = targets.len(),
        scored = ranked.len(),
        "scored foods"
    );

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(title: &str) -> Citation {
        Citation {
            title: title.to_string(),
            year: 2020,
            doi: String::new(),
            kind: "RCT".to_string(),
        }
    }

    fn store() -> GraphStore {
        GraphStore::new(GraphData::new(
            vec![
                Node::new("oats", "Oats", NodeType::Food, "Grains"),
                Node::new("salmon", "Salmon", NodeType::Food, "Seafood"),
                Node::new("sugar", "Sugar", NodeType::Food, "Treats"),
                Node::new("ldl", "LDL Cholesterol", NodeType::Biomarker, "Lipids"),
                Node::new("tg", "Triglycerides", NodeType::Biomarker, "Lipids"),
                Node::new("hdl", "HDL Cholesterol", NodeType::Biomarker, "Lipids"),
            ],
            vec![
                Link::new("oats", "ldl", Effect::Decrease, Strength::High)
                    .with_citations(vec![
                        citation("Oat beta-glucan"),
                        citation("Oats meta-analysis"),
                    ]),
                Link::new("salmon", "tg", Effect::Decrease, Strength::High),
                Link::new("salmon", "ldl", Effect::Decrease, Strength::Low),
                Link::new("sugar", "tg", Effect::Increase, Strength::High),
                Link::new("sugar", "ldl", Effect::Increase, Strength::Medium),
                Link::new("ghost", "ldl", Effect::Decrease, Strength::High),
                Link::new("ldl", "tg", Effect::Decrease, Strength::High),
            ],
        ))
    }

    fn lipid_query() -> RecommendQuery {
        RecommendQuery::new()
            .target("ldl", Direction::Decrease)
            .target("tg", Direction::Decrease)
    }

    #[test]
    fn empty_targets_yield_nothing() {
        let set = recommend(&store(), &RecommendQuery::new());
        assert!(set.is_empty());
    }

    #[test]
    fn coverage_rewards_breadth() {
        let set = recommend(&store(), &lipid_query());
        let ids: Vec<&str> = set.recommendations.iter().map(|r| r.food.id.as_str()).collect();
        // salmon: 7.8 + 2.6 + 3.2 = 13.6; oats: 7.8 + 1.6 + 0.5 = 9.9
        assert_eq!(ids, vec!["salmon", "oats"]);

        let salmon = &set.recommendations[0];
        assert_eq!(salmon.coverage_count, 2);
        assert_eq!(salmon.coverage_pct, 100);
        assert!((salmon.final_score - 13.6).abs() < 1e-9);

        let oats = &set.recommendations[1];
        assert_eq!(oats.coverage_pct, 50);
        assert_eq!(oats.evidence_count, 2);
        assert!((oats.final_score - 9.9).abs() < 1e-9);
    }

    #[test]
    fn conflicting_food_goes_to_limit_list() {
        let set = recommend(&store(), &lipid_query());
        assert_eq!(set.foods_to_limit.len(), 1);
        let sugar = &set.foods_to_limit[0];
        assert_eq!(sugar.food.id.as_str(), "sugar");
        assert_eq!(sugar.conflict_count, 2);
        // -5.1 - 3.4 + 3.2 - 1.6
        assert!((sugar.final_score - -6.9).abs() < 1e-9);
        assert!(sugar.matches.iter().all(|m| !m.beneficial));
    }

    #[test]
    fn direction_flip_reverses_roles() {
        let query = RecommendQuery::new().target("tg", Direction::Increase);
        let set = recommend(&store(), &query);
        let ids: Vec<&str> = set.recommendations.iter().map(|r| r.food.id.as_str()).collect();
        assert_eq!(ids, vec!["sugar"]);
        assert_eq!(set.foods_to_limit[0].food.id.as_str(), "salmon");
    }

    #[test]
    fn unspecified_direction_defaults_to_decrease() {
        let query = RecommendQuery::new().target_default("ldl");
        assert_eq!(query.direction_for("ldl"), Direction::Decrease);
        let set = recommend(&store(), &query);
        assert_eq!(set.recommendations[0].food.id.as_str(), "oats");
    }

    #[test]
    fn non_food_sources_and_dangling_links_are_skipped() {
        let query = RecommendQuery::new().target_default("tg");
        let ranked = score_foods(&store(), &query, &ScoringWeights::default());
        assert!(ranked.iter().all(|r| r.food.is_food()));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn unlinked_biomarker_contributes_nothing() {
        let query = RecommendQuery::new().target_default("hdl");
        assert!(recommend(&store(), &query).is_empty());

        let query = lipid_query().target_default("hdl");
        let set = recommend(&store(), &query);
        let salmon = &set.recommendations[0];
        assert_eq!(salmon.coverage_pct, 67);
    }

    #[test]
    fn duplicate_targets_count_once() {
        let query = lipid_query().target_default("ldl");
        assert_eq!(query.unique_targets().len(), 2);
        let set = recommend(&store(), &query);
        assert_eq!(set.recommendations[0].matches.len(), 2);
        assert_eq!(set.recommendations[0].coverage_pct, 100);
    }

    #[test]
    fn ties_break_by_food_id() {
        let data = GraphData::new(
            vec![
                Node::new("b-food", "B", NodeType::Food, "X"),
                Node::new("a-food", "A", NodeType::Food, "X"),
                Node::new("m", "M", NodeType::Biomarker, "Y"),
            ],
            vec![
                Link::new("b-food", "m", Effect::Decrease, Strength::Low),
                Link::new("a-food", "m", Effect::Decrease, Strength::Low),
            ],
        );
        let set = recommend(&GraphStore::new(data), &RecommendQuery::new().target_default("m"));
        let ids: Vec<&str> = set.recommendations.iter().map(|r| r.food.id.as_str()).collect();
        assert_eq!(ids, vec!["a-food", "b-food"]);
    }

    #[test]
    fn evidence_term_is_capped() {
        let many: Vec<Citation> = (0..20).map(|i| citation(&format!("paper {i}"))).collect();
        let data = GraphData::new(
            vec![
                Node::new("f", "F", NodeType::Food, "X"),
                Node::new("m", "M", NodeType::Biomarker, "Y"),
            ],
            vec![Link::new("f", "m", Effect::Decrease, Strength::Low).with_citations(many)],
        );
        let set = recommend(&GraphStore::new(data), &RecommendQuery::new().target_default("m"));
        let rec = &set.recommendations[0];
        assert_eq!(rec.evidence_count, 20);
        // 2.6 + 1.6 + 8 * 0.25
        assert!((rec.final_score - 6.2).abs() < 1e-9);
    }

    #[test]
    fn limit_list_is_truncated() {
        let mut nodes = vec![Node::new("m", "M", NodeType::Biomarker, "Y")];
        let mut links = Vec::new();
        for i in 0..10 {
            let id = format!("f{i}");
            nodes.push(Node::new(&id, &id, NodeType::Food, "X"));
            links.push(Link::new(&id, "m", Effect::Increase, Strength::High));
        }
        let set = recommend(
            &GraphStore::new(GraphData::new(nodes, links)),
            &RecommendQuery::new().target_default("m"),
        );
        assert!(set.recommendations.is_empty());
        assert_eq!(set.foods_to_limit.len(), 6);
    }

    #[test]
    fn summary_averages_coverage() {
        let set = recommend(&store(), &lipid_query());
        let summary = set.summary();
        assert_eq!(summary.avg_coverage, 75);
        assert_eq!(summary.top_evidence, 2);
        assert_eq!(RecommendationSet::default().summary(), RecommendationSummary::default());
    }
}
