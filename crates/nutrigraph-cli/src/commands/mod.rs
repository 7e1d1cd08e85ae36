//! CLI command implementations.

pub mod explore;
pub mod init;
pub mod papers;
pub mod recommend;
pub mod search;
pub mod stats;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use nutrigraph_core::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;

/// Settings shared by every query command.
pub struct RunContext {
    pub config: Config,
    /// `--data` override for the graph file.
    pub data: Option<PathBuf>,
    pub json: bool,
}

impl RunContext {
    pub fn load(data: Option<PathBuf>, json: bool) -> Result<Self> {
        Ok(Self {
            config: Config::load()?,
            data,
            json,
        })
    }

    pub fn data_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| self.config.data_path())
    }

    /// Load the graph once through a session.
    pub fn store(&self) -> Result<Arc<GraphStore>> {
        let path = self.data_path();
        if !path.exists() {
            bail!(
                "Graph file not found: {}. Pass {} or set [data] path in {}.",
                path.display(),
                "--data".cyan(),
                crate::config::CONFIG_FILE.cyan()
            );
        }
        let session = GraphSession::load_from(&JsonFileSource::new(&path));
        session
            .store()
            .with_context(|| format!("Failed to load graph from {}", path.display()))
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn strength_tag(strength: &Strength) -> colored::ColoredString {
    let text = strength.to_string();
    match strength {
        Strength::High => text.green(),
        Strength::Medium => text.yellow(),
        _ => text.dimmed(),
    }
}

fn effect_arrow(effect: &Effect) -> colored::ColoredString {
    match effect {
        Effect::Increase => "↑".cyan(),
        Effect::Decrease => "↓".magenta(),
        Effect::Other(_) => "?".dimmed(),
    }
}

fn type_tag(node: &Node) -> colored::ColoredString {
    match node.node_type {
        NodeType::Food => "food".green(),
        NodeType::Biomarker => "biomarker".blue(),
    }
}
