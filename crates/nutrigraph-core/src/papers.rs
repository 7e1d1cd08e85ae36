//! Research paper index - citations deduplicated across links.

use crate::store::GraphStore;
use serde::Serialize;
use std::collections::HashMap;

/// A food/biomarker relationship a paper is cited for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperConnection {
    pub food: String,
    pub biomarker: String,
    pub summary: String,
}

/// A distinct cited paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperEntry {
    pub title: String,
    pub year: i32,
    pub doi: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub connections: Vec<PaperConnection>,
}

impl PaperEntry {
    fn matches(&self, q: &str) -> bool {
        self.title.to_lowercase().contains(q)
            || self.connections.iter().any(|c| {
                c.food.to_lowercase().contains(q)
                    || c.biomarker.to_lowercase().contains(q)
                    || c.summary.to_lowercase().contains(q)
            })
    }
}

/// Every cited paper, keyed by DOI (or title when the DOI is blank), newest
/// first and then by title.
pub fn papers(store: &GraphStore) -> Vec<PaperEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, PaperEntry> = HashMap::new();

    for link in store.resolved_links() {
        for cite in &link.citations {
            let key = if cite.doi.is_empty() {
                cite.title.clone()
            } else {
                cite.doi.clone()
            };
            let entry = by_key.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                PaperEntry {
                    title: cite.title.clone(),
                    year: cite.year,
                    doi: cite.doi.clone(),
                    kind: cite.kind.clone(),
                    connections: Vec::new(),
                }
            });
            entry.connections.push(PaperConnection {
                food: store.label_of(link.source.as_str()).to_string(),
                biomarker: store.label_of(link.target.as_str()).to_string(),
                summary: link.summary.clone(),
            });
        }
    }

    let mut entries: Vec<PaperEntry> = order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect();
    entries.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.title.cmp(&b.title)));
    entries
}

/// Papers whose title or any connection mentions `query`, case-insensitive.
pub fn search_papers(store: &GraphStore, query: &str) -> Vec<PaperEntry> {
    let q = query.trim().to_lowercase();
    let all = papers(store);
    if q.is_empty() {
        return all;
    }
    all.into_iter().filter(|p| p.matches(&q)).collect()
}
