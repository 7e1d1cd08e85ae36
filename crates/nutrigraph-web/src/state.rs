//! Application state for the web server.
//!
//! The graph session is shared read-only across handlers. Loading happens
//! once, in a background task started at boot; until it completes every
//! graph query answers 503.

use crate::source::SourceSpec;
use nutrigraph_core::error::Result;
use nutrigraph_core::session::{GraphSession, LoadStatus};
use nutrigraph_core::store::GraphStore;
use nutrigraph_core::types::GraphData;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    session: Arc<GraphSession>,
}

impl AppState {
    /// State whose graph has not loaded yet.
    pub fn pending() -> Self {
        Self::default()
    }

    /// State with an already-loaded graph.
    pub fn with_graph(data: GraphData) -> Self {
        Self {
            session: Arc::new(GraphSession::ready(data)),
        }
    }

    pub fn session(&self) -> &GraphSession {
        &self.session
    }

    pub fn status(&self) -> LoadStatus {
        self.session.status()
    }

    /// The loaded graph, or `NotReady`/`Unavailable`.
    pub fn store(&self) -> Result<Arc<GraphStore>> {
        self.session.store()
    }

    /// Start the one-shot load in the background.
    pub fn spawn_load(&self, spec: SourceSpec, timeout: Duration) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            info!(source = %spec.describe(), "loading graph");
            let result = spec.fetch(timeout).await;
            let _ = session.complete(result);
        })
    }
}
