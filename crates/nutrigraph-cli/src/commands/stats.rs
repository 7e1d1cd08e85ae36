//! Show catalog statistics.

use anyhow::Result;
use colored::Colorize;
use nutrigraph_core::prelude::*;
use serde::Serialize;

use super::{print_json, RunContext};

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: CatalogStats,
    top_foods: Vec<RankedNode>,
    top_biomarkers: Vec<RankedNode>,
}

pub fn run(ctx: &RunContext, top: Option<usize>) -> Result<()> {
    let store = ctx.store()?;
    let index = ConnectivityIndex::build(&store);
    let top = top.unwrap_or(ctx.config.display.top);

    let report = StatsReport {
        stats: catalog_stats(&store),
        top_foods: top_connected(&store, &index, NodeType::Food, top),
        top_biomarkers: top_connected(&store, &index, NodeType::Biomarker, top),
    };
    if ctx.json {
        return print_json(&report);
    }

    let stats = &report.stats;
    println!("{}", "NutriGraph Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Catalog".blue().bold());
    println!("  Foods:             {}", stats.foods.to_string().cyan());
    println!("  Biomarkers:        {}", stats.biomarkers.to_string().cyan());
    println!("  Links:             {}", stats.links.to_string().cyan());
    println!("  Papers:            {}", stats.papers.to_string().cyan());
    println!(
        "  Groups:            {} food, {} biomarker",
        stats.food_groups, stats.biomarker_groups
    );
    println!();

    println!("{}", "Evidence".blue().bold());
    println!(
        "  High strength:     {} ({}%)",
        stats.high_strength.to_string().green(),
        stats.evidence_ratio
    );
    println!("  Cited links:       {}%", stats.citation_coverage);
    println!("  Links per food:    {:.2}", stats.avg_links_per_food);
    println!("  Links per marker:  {:.2}", stats.avg_links_per_biomarker);
    println!();

    print_ranked("Most connected foods", &report.top_foods);
    print_ranked("Most connected biomarkers", &report.top_biomarkers);

    println!("{}", "═".repeat(40).dimmed());
    Ok(())
}

fn print_ranked(title: &str, ranked: &[RankedNode]) {
    if ranked.is_empty() {
        return;
    }
    println!("{}", title.blue().bold());
    for (i, entry) in ranked.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        println!(
            "  {} {} {}",
            rank.blue(),
            entry.node.label.white().bold(),
            format!("({} links)", entry.count).dimmed()
        );
    }
    println!();
}
