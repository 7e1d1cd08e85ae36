//! NutriGraph Web - HTTP service over the food/biomarker evidence graph.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use nutrigraph_web::{routes, AppState, SourceSpec};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nutrigraph-web")]
#[command(about = "NutriGraph Web - evidence graph queries over HTTP")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Graph JSON file path or http(s) URL
    #[arg(short, long, env = "NUTRIGRAPH_SOURCE", default_value = "data/graph.json")]
    source: String,

    /// Timeout for fetching a remote graph, in seconds
    #[arg(long, default_value = "30")]
    fetch_timeout_secs: u64,

    /// Comma-separated allowed CORS origins (permissive when unset)
    #[arg(long, env = "NUTRIGRAPH_CORS_ORIGINS")]
    cors_origins: Option<String>,
}

fn cors_layer(origins: Option<&str>) -> Result<CorsLayer> {
    let Some(raw) = origins.filter(|s| !s.trim().is_empty()) else {
        return Ok(CorsLayer::permissive());
    };
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| HeaderValue::from_str(s).with_context(|| format!("invalid CORS origin: {s}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let state = AppState::pending();
    let spec = SourceSpec::parse(&cli.source);
    if let SourceSpec::File(path) = &spec {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "graph file does not exist; service will report unavailable"
            );
        }
    }
    state.spawn_load(spec, Duration::from_secs(cli.fetch_timeout_secs));

    let app = routes::create_router(state, cors_layer(cli.cors_origins.as_deref())?);

    info!(%addr, "starting NutriGraph web service");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
