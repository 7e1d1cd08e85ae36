//! List cited papers.

use anyhow::Result;
use colored::Colorize;
use nutrigraph_core::prelude::*;

use super::{print_json, RunContext};

pub fn run(ctx: &RunContext, query: Option<&str>) -> Result<()> {
    let store = ctx.store()?;
    let entries = search_papers(&store, query.unwrap_or(""));

    if ctx.json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("{} No papers found", "•".yellow());
        return Ok(());
    }

    for paper in &entries {
        println!(
            "{} {}",
            paper.title.white().bold(),
            format!("({}, {})", paper.year, paper.kind).dimmed()
        );
        if !paper.doi.is_empty() {
            println!("  {}", paper.doi.cyan());
        }
        for c in &paper.connections {
            println!("  {} {} {} {}", "·".dimmed(), c.food, "→".dimmed(), c.biomarker);
        }
    }
    println!();
    println!("{} {} papers", "✓".green(), entries.len().to_string().cyan());
    Ok(())
}
