//! Load-once session holding the process-wide graph snapshot.
//!
//! A session starts `Pending`, and is completed exactly once with either a
//! loaded graph (`Ready`) or the reason the load failed (`Failed`). Queries
//! against a pending or failed session return an explicit error instead of
//! running on empty data.

use crate::error::{NutriError, Result};
use crate::source::GraphSource;
use crate::store::GraphStore;
use crate::types::GraphData;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Unavailable,
}

/// Holds the graph once it has loaded.
#[derive(Debug, Default)]
pub struct GraphSession {
    cell: OnceLock<std::result::Result<Arc<GraphStore>, String>>,
}

impl GraphSession {
    /// A session whose load has not completed.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A session that is already ready.
    pub fn ready(data: GraphData) -> Self {
        let session = Self::default();
        let _ = session.cell.set(Ok(Arc::new(GraphStore::new(data))));
        session
    }

    /// Load synchronously from a source and complete the session.
    pub fn load_from(source: &dyn GraphSource) -> Self {
        let session = Self::pending();
        info!(source = %source.describe(), "loading graph");
        let _ = session.complete(source.load());
        session
    }

    /// Record the outcome of the load. Only the first call takes effect.
    pub fn complete(&self, result: Result<GraphData>) -> Result<()> {
        let outcome = match result {
            Ok(data) => {
                info!(nodes = data.nodes.len(), links = data.links.len(), "graph ready");
                Ok(Arc::new(GraphStore::new(data)))
            }
            Err(e) => {
                warn!(error = %e, "graph load failed");
                Err(e.to_string())
            }
        };
        self.cell.set(outcome).map_err(|_| NutriError::AlreadyLoaded)
    }

    pub fn status(&self) -> LoadStatus {
        match self.cell.get() {
            None => LoadStatus::Loading,
            Some(Ok(_)) => LoadStatus::Ready,
            Some(Err(_)) => LoadStatus::Unavailable,
        }
    }

    /// The loaded store, or why there is none.
    pub fn store(&self) -> Result<Arc<GraphStore>> {
        match self.cell.get() {
            None => Err(NutriError::NotReady),
            Some(Ok(store)) => Ok(Arc::clone(store)),
            Some(Err(msg)) => Err(NutriError::Unavailable(msg.clone())),
        }
    }

    /// The failure message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self.cell.get() {
            Some(Err(msg)) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::types::{Node, NodeType};

    #[test]
    fn pending_session_is_not_ready() {
        let session = GraphSession::pending();
        assert_eq!(session.status(), LoadStatus::Loading);
        assert!(matches!(session.store(), Err(NutriError::NotReady)));
    }

    #[test]
    fn completes_once() {
        let session = GraphSession::pending();
        session.complete(Ok(GraphData::default())).unwrap();
        assert_eq!(session.status(), LoadStatus::Ready);

        let second = session.complete(Err(NutriError::Unavailable("late".into())));
        assert!(matches!(second, Err(NutriError::AlreadyLoaded)));
        assert_eq!(session.status(), LoadStatus::Ready);
    }

    #[test]
    fn failed_load_is_explicit() {
        let session = GraphSession::pending();
        session
            .complete(Err(NutriError::Unavailable("connection refused".into())))
            .unwrap();
        assert_eq!(session.status(), LoadStatus::Unavailable);
        assert!(session.error().unwrap().contains("connection refused"));
        match session.store() {
            Err(NutriError::Unavailable(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn load_from_static_source() {
        let data = GraphData::new(
            vec![Node::new("kale", "Kale", NodeType::Food, "Vegetables")],
            vec![],
        );
        let session = GraphSession::load_from(&StaticSource::new(data));
        let store = session.store().unwrap();
        assert!(store.node_by_id("kale").is_some());
    }
}
