//! Graph sources - where the `{ nodes, links }` payload comes from.
//!
//! The engine treats the source as a black box. A source either yields the
//! complete payload or an error; partial data is never returned.

use crate::error::{NutriError, Result};
use crate::types::GraphData;
use std::path::{Path, PathBuf};
use tracing::info;

/// A one-shot provider of graph data.
pub trait GraphSource {
    /// Fetch and parse the full graph.
    fn load(&self) -> Result<GraphData>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Reads the graph from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphSource for JsonFileSource {
    fn load(&self) -> Result<GraphData> {
        let content = std::fs::read_to_string(&self.path)?;
        let data = parse_graph(&content)?;
        info!(
            path = %self.path.display(),
            nodes = data.nodes.len(),
            links = data.links.len(),
            "loaded graph file"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// An in-memory source, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: GraphData,
}

impl StaticSource {
    pub fn new(data: GraphData) -> Self {
        Self { data }
    }
}

impl GraphSource for StaticSource {
    fn load(&self) -> Result<GraphData> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        "in-memory graph".to_string()
    }
}

/// Parse a graph payload from JSON text.
pub fn parse_graph(json: &str) -> Result<GraphData> {
    serde_json::from_str(json).map_err(NutriError::from)
}
