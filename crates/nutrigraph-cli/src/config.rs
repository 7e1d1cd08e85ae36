//! Configuration management for the NutriGraph CLI.

use anyhow::{Context, Result};
use nutrigraph_core::types::Direction;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "nutrigraph.toml";

/// NutriGraph project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub display: DisplayConfig,

    /// Directory of the file this config was read from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Graph JSON file, relative to the config file.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    #[serde(default = "default_limit_preview")]
    pub limit_preview: usize,
    #[serde(default)]
    pub default_direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_data_path() -> PathBuf { PathBuf::from("data/graph.json") }
fn default_limit_preview() -> usize { 6 }
fn default_top() -> usize { 10 }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit_preview: default_limit_preview(),
            default_direction: Direction::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { top: default_top() }
    }
}

impl Config {
    /// Load config from nutrigraph.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&cwd)
    }

    /// Like [`Config::load`], starting the search at `start`.
    pub fn load_from(start: &Path) -> Result<Self> {
        match find_config_file(start) {
            Some(path) => Self::read(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// The graph file, resolved against the config file's directory.
    pub fn data_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) if self.data.path.is_relative() => dir.join(&self.data.path),
            _ => self.data.path.clone(),
        }
    }
}

/// Find nutrigraph.toml in `start` or its parent directories.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
