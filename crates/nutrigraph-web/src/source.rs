//! Where the web service gets its graph: a local file or a remote URL.

use nutrigraph_core::error::{NutriError, Result};
use nutrigraph_core::source::{GraphSource, JsonFileSource};
use nutrigraph_core::types::GraphData;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// A parsed `--source` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Remote(String),
}

impl SourceSpec {
    /// URLs starting with `http://` or `https://` are remote; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceSpec::Remote(raw.to_string())
        } else {
            SourceSpec::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceSpec::File(path) => format!("file {}", path.display()),
            SourceSpec::Remote(url) => format!("url {url}"),
        }
    }

    /// Fetch the graph once. Any failure maps to `Unavailable`.
    pub async fn fetch(&self, timeout: Duration) -> Result<GraphData> {
        match self {
            SourceSpec::File(path) => {
                let source = JsonFileSource::new(path.clone());
                tokio::task::spawn_blocking(move || source.load())
                    .await
                    .map_err(|e| NutriError::Unavailable(format!("loader task failed: {e}")))?
            }
            SourceSpec::Remote(url) => RemoteSource::new(url.clone(), timeout).fetch().await,
        }
    }
}

/// Fetches the graph JSON from an HTTP endpoint such as `GET /graph`.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    pub async fn fetch(&self) -> Result<GraphData> {
        debug!(url = %self.url, timeout_secs = self.timeout.as_secs(), "fetching graph");
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NutriError::Unavailable(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| NutriError::Unavailable(format!("fetch {}: {e}", self.url)))?;

        let data: GraphData = response
            .json()
            .await
            .map_err(|e| NutriError::Unavailable(format!("decode {}: {e}", self.url)))?;

        info!(
            url = %self.url,
            nodes = data.nodes.len(),
            links = data.links.len(),
            "fetched graph"
        );
        Ok(data)
    }
}
