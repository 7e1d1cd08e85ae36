//! Rank foods for a set of target biomarkers.

use anyhow::{bail, Result};
use colored::Colorize;
use nutrigraph_core::prelude::*;
use serde::Serialize;

use super::{effect_arrow, print_json, strength_tag, RunContext};

/// Parse `id` or `id:direction`. A suffix that is not a direction stays
/// part of the id, so ids such as `omega:3` pass through whole.
pub fn parse_target(raw: &str) -> Result<(String, Option<Direction>)> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("Bad target: missing biomarker id");
    }
    match raw.rsplit_once(':') {
        Some((id, dir)) => match dir.parse::<Direction>() {
            Ok(_) if id.is_empty() => bail!("Bad target {raw:?}: missing biomarker id"),
            Ok(direction) => Ok((id.to_string(), Some(direction))),
            Err(_) => Ok((raw.to_string(), None)),
        },
        None => Ok((raw.to_string(), None)),
    }
}

pub fn build_query(targets: &[String], default_direction: Direction) -> Result<RecommendQuery> {
    let mut query = RecommendQuery {
        default_direction,
        ..RecommendQuery::default()
    };
    for raw in targets {
        query = match parse_target(raw)? {
            (id, Some(direction)) => query.target(id, direction),
            (id, None) => query.target_default(id),
        };
    }
    Ok(query)
}

#[derive(Serialize)]
struct RecommendReport {
    #[serde(flatten)]
    set: RecommendationSet,
    summary: RecommendationSummary,
}

pub fn run(ctx: &RunContext, targets: &[String], limit: Option<usize>) -> Result<()> {
    let store = ctx.store()?;
    let query = build_query(targets, ctx.config.recommend.default_direction)?;
    let weights = ScoringWeights {
        limit_preview: limit.unwrap_or(ctx.config.recommend.limit_preview),
        ..ScoringWeights::default()
    };

    let set = recommend_with(&store, &query, &weights);
    let summary = set.summary();
    if ctx.json {
        return print_json(&RecommendReport { set, summary });
    }

    let goals: Vec<String> = query
        .unique_targets()
        .into_iter()
        .map(|t| {
            let label = store.label_of(t.as_str());
            format!("{} {}", label, query.direction_for(t.as_str()))
        })
        .collect();
    println!("{} Targets: {}", "→".blue(), goals.join(", ").cyan());
    println!();

    if set.recommendations.is_empty() {
        println!("{} No foods with supporting evidence", "•".yellow());
    } else {
        println!("{}", "Recommended".green().bold());
        for (i, rec) in set.recommendations.iter().enumerate() {
            print_food(i + 1, rec);
        }
        println!();
        println!(
            "{} {} foods, avg coverage {}%, top evidence {}",
            "✓".green(),
            set.recommendations.len().to_string().cyan(),
            summary.avg_coverage,
            summary.top_evidence
        );
    }

    if !set.foods_to_limit.is_empty() {
        println!();
        println!("{}", "Foods to limit".red().bold());
        for (i, rec) in set.foods_to_limit.iter().enumerate() {
            print_food(i + 1, rec);
        }
    }
    Ok(())
}

fn print_food(rank: usize, rec: &FoodRecommendation) {
    let rank = format!("{rank}.");
    println!(
        "  {} {} {}",
        rank.blue(),
        rec.food.label.white().bold(),
        format!(
            "(score {:.1}, coverage {}%, {} citations, {} conflicts)",
            rec.final_score, rec.coverage_pct, rec.evidence_count, rec.conflict_count
        )
        .dimmed()
    );
    for m in &rec.matches {
        let mark = if m.beneficial { "✓".green() } else { "✗".red() };
        println!(
            "      {} {} {} {}",
            mark,
            effect_arrow(&m.effect),
            m.biomarker,
            strength_tag(&m.strength)
        );
    }
}
