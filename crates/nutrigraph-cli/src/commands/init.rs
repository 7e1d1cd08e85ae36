//! Initialize a NutriGraph project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing NutriGraph project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if config_path.exists() {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    } else {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    }

    let data_dir = base_path.join("data");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("  {} Created {}", "✓".green(), data_dir.display());

    println!();
    println!("{} NutriGraph project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} copy your graph to data/graph.json", "1.".blue());
    println!("  {} nutrigraph stats", "2.".blue());
    println!("  {} nutrigraph recommend ldl:decrease", "3.".blue());

    Ok(())
}
