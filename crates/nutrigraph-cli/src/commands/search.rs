//! Node search and details.

use anyhow::{bail, Result};
use colored::Colorize;
use nutrigraph_core::prelude::*;
use serde::Serialize;

use super::{effect_arrow, print_json, strength_tag, type_tag, RunContext};

pub fn search(ctx: &RunContext, query: &str, include_group: bool) -> Result<()> {
    let store = ctx.store()?;
    let results = if include_group {
        search_with_group(&store, query)
    } else {
        nutrigraph_core::catalog::search(&store, query)
    };

    if ctx.json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("{} No nodes match: {}", "•".yellow(), query.cyan());
        return Ok(());
    }

    println!("{} Nodes matching {}:", "→".blue(), query.cyan().bold());
    println!();
    for node in &results {
        println!(
            "  {} {} {}",
            node.label.white().bold(),
            format!("[{}]", node.id).dimmed(),
            format!("{} · {}", type_tag(node), node.group).dimmed()
        );
    }
    println!();
    println!("{} {} nodes", "✓".green(), results.len().to_string().cyan());
    Ok(())
}

#[derive(Serialize)]
struct NodeReport<'a> {
    node: &'a Node,
    connectivity: usize,
    evidence: Vec<EvidenceEntry>,
}

pub fn node(ctx: &RunContext, id: &str) -> Result<()> {
    let store = ctx.store()?;
    let Some(node) = store.node_by_id(id) else {
        bail!("Node not found: {}", id.cyan());
    };
    let index = ConnectivityIndex::build(&store);
    let evidence = match node.node_type {
        NodeType::Food => food_evidence(&store, id),
        NodeType::Biomarker => biomarker_evidence(&store, id),
    };
    let report = NodeReport {
        node,
        connectivity: index.connectivity_count(id),
        evidence,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "{} {} {}",
        node.label.white().bold(),
        format!("[{}]", node.id).dimmed(),
        format!("{} · {}", type_tag(node), node.group).dimmed()
    );
    if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {description}");
    }
    println!("  Connections: {}", report.connectivity.to_string().cyan());
    println!();

    for entry in &report.evidence {
        println!(
            "  {} {} {}",
            effect_arrow(&entry.effect),
            entry.counterpart.label.white(),
            strength_tag(&entry.strength)
        );
        let detail: Vec<&str> = [entry.magnitude.as_str(), entry.timeframe.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !detail.is_empty() {
            println!("      {}", detail.join(", ").dimmed());
        }
        if !entry.summary.is_empty() {
            println!("      {}", entry.summary);
        }
        for citation in &entry.citations {
            println!(
                "      {} {} ({})",
                "·".dimmed(),
                citation.title.italic(),
                citation.year
            );
        }
    }
    Ok(())
}
