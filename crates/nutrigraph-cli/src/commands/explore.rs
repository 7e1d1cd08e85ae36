//! Explore graph structure: neighborhoods, subgraphs and groups.

use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use nutrigraph_core::prelude::*;
use serde::Serialize;

use super::{print_json, type_tag, RunContext};

#[derive(Serialize)]
struct NeighborReport {
    id: String,
    neighbors: Vec<NodeId>,
    connectivity: usize,
}

pub fn neighbors(ctx: &RunContext, id: &str) -> Result<()> {
    let store = ctx.store()?;
    if !store.contains(id) {
        bail!("Node not found: {}", id.cyan());
    }
    let index = ConnectivityIndex::build(&store);

    let mut ids: Vec<NodeId> = index.neighbors_of(id).into_iter().collect();
    ids.sort();
    let report = NeighborReport {
        id: id.to_string(),
        connectivity: index.connectivity_count(id),
        neighbors: ids,
    };
    if ctx.json {
        return print_json(&report);
    }

    println!(
        "{} Neighborhood of {} ({} links):",
        "→".blue(),
        store.label_of(id).cyan().bold(),
        report.connectivity
    );
    println!();
    for pos in index.incident_links(id) {
        let link = &store.links()[pos];
        let other = if link.source.as_str() == id { &link.target } else { &link.source };
        if let Some(node) = store.node_by_id(other.as_str()) {
            println!(
                "  {} {} {} {}",
                node.label.white().bold(),
                format!("[{}]", node.id).dimmed(),
                type_tag(node),
                format!("({}, {})", link.effect, link.strength).dimmed()
            );
        }
    }
    Ok(())
}

pub fn subgraph(ctx: &RunContext, node_type: &str, group: Option<String>) -> Result<()> {
    let node_type: TypeFilter = node_type.parse().map_err(|e: String| anyhow!(e))?;
    let store = ctx.store()?;
    let filter = SubgraphFilter::new(node_type, group);
    let view = filter.apply(store.data());

    if ctx.json {
        return print_json(&view);
    }

    let counts = view.type_counts();
    println!(
        "{} Subgraph type={} group={}:",
        "→".blue(),
        filter.node_type.to_string().cyan(),
        filter.group.as_deref().unwrap_or("any").cyan()
    );
    println!(
        "  {} foods, {} biomarkers, {} links",
        counts.foods.to_string().cyan(),
        counts.biomarkers.to_string().cyan(),
        view.links.len().to_string().cyan()
    );
    println!();

    for link in &view.links {
        println!(
            "  {} {} {} {}",
            store.label_of(link.source.as_str()).white(),
            "→".dimmed(),
            store.label_of(link.target.as_str()).white(),
            format!("({}, {})", link.effect, link.strength).dimmed()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct GroupReport {
    foods: Vec<GroupCount>,
    biomarkers: Vec<GroupCount>,
}

pub fn groups(ctx: &RunContext) -> Result<()> {
    let store = ctx.store()?;
    let report = GroupReport {
        foods: nutrigraph_core::catalog::groups(&store, NodeType::Food),
        biomarkers: nutrigraph_core::catalog::groups(&store, NodeType::Biomarker),
    };
    if ctx.json {
        return print_json(&report);
    }

    let sections = [
        ("Food groups", &report.foods),
        ("Biomarker groups", &report.biomarkers),
    ];
    for (title, list) in sections {
        println!("{}", title.blue().bold());
        for group in list {
            println!(
                "  {} {}",
                group.group.white(),
                format!("({})", group.count).dimmed()
            );
        }
        println!();
    }
    Ok(())
}
