//! NutriGraph CLI - query the food/biomarker evidence graph.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::RunContext;

#[derive(Parser)]
#[command(name = "nutrigraph")]
#[command(
    author,
    version,
    about = "NutriGraph - food and biomarker evidence explorer",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Graph JSON file (overrides nutrigraph.toml)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default nutrigraph.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show catalog statistics
    Stats {
        /// Number of most connected foods and biomarkers to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Search nodes by label
    Search {
        query: String,

        /// Also match on group name
        #[arg(short, long)]
        group: bool,
    },

    /// Show one node and its evidence
    Node { id: String },

    /// Show the one-hop neighborhood of a node
    Neighbors { id: String },

    /// Show a filtered subgraph
    Subgraph {
        /// Node type: all, food or biomarker
        #[arg(short = 't', long = "type", default_value = "all")]
        node_type: String,

        /// Group name
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Rank foods for target biomarkers, e.g. `ldl:decrease hdl:increase`
    Recommend {
        /// Biomarker ids, each optionally suffixed with `:increase` or `:decrease`
        #[arg(required = true)]
        targets: Vec<String>,

        /// Foods-to-limit preview size
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List food and biomarker groups
    Groups,

    /// List cited papers
    Papers {
        /// Filter by title, food, biomarker or summary
        query: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = || RunContext::load(cli.data.clone(), cli.json);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Stats { top } => commands::stats::run(&ctx()?, top),
        Commands::Search { query, group } => commands::search::search(&ctx()?, &query, group),
        Commands::Node { id } => commands::search::node(&ctx()?, &id),
        Commands::Neighbors { id } => commands::explore::neighbors(&ctx()?, &id),
        Commands::Subgraph { node_type, group } => {
            commands::explore::subgraph(&ctx()?, &node_type, group)
        }
        Commands::Recommend { targets, limit } => {
            commands::recommend::run(&ctx()?, &targets, limit)
        }
        Commands::Groups => commands::explore::groups(&ctx()?),
        Commands::Papers { query } => commands::papers::run(&ctx()?, query.as_deref()),
    }
}
