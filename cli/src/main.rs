//! Orgraph CLI: build org chart graphs from local CSV exports
//!
//! Loads the hierarchy (and optionally the custom data) into memory and runs
//! one explorer call per invocation.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use orgraph::directory::loader::{load_custom_csv, load_hierarchy_csv};
use orgraph::{EngineConfig, Explorer, GraphResponse, MemoryDirectory, NodeDetails, ResponseKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orgraph", version, about = "Org chart graph explorer")]
struct Cli {
    /// Hierarchy CSV export
    #[arg(long, global = true, env = "ORGRAPH_HIERARCHY")]
    hierarchy: Option<PathBuf>,

    /// Custom data CSV export
    #[arg(long, global = true, env = "ORGRAPH_CUSTOM")]
    custom: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a name, position, skill or org unit
    Search {
        term: String,
    },
    /// Build the tree for a unique id from a candidate list
    Select {
        unique_id: String,
    },
    /// Re-root on a node id as shown in a graph
    Visit {
        node: String,
    },
    /// Landing tree for a viewer
    Home {
        #[arg(long)]
        viewer: Option<String>,
    },
    /// Show directory details for a node
    Details {
        node: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let explorer = load_explorer(&cli)?;

    match &cli.command {
        Commands::Search { term } => print_graph(&explorer.search(term)?, &cli.format),
        Commands::Select { unique_id } => print_graph(&explorer.select_candidate(unique_id)?, &cli.format),
        Commands::Visit { node } => print_graph(&explorer.visit_node(node)?, &cli.format),
        Commands::Home { viewer } => print_graph(&explorer.home(viewer.as_deref())?, &cli.format),
        Commands::Details { node } => match explorer.node_details(node)? {
            Some(details) => print_details(&details, &cli.format),
            None => {
                println!("(no such person: {})", node);
                Ok(())
            }
        },
    }
}

fn load_explorer(cli: &Cli) -> anyhow::Result<Explorer<MemoryDirectory>> {
    let path = cli
        .hierarchy
        .as_ref()
        .context("--hierarchy (or ORGRAPH_HIERARCHY) is required")?;
    let identities = load_hierarchy_csv(path)
        .with_context(|| format!("reading hierarchy from {}", path.display()))?;
    let custom = match &cli.custom {
        Some(path) => load_custom_csv(path)
            .with_context(|| format!("reading custom data from {}", path.display()))?,
        None => Vec::new(),
    };

    let config = EngineConfig::default();
    let directory = MemoryDirectory::from_records(identities, custom).with_result_size(config.result_size);
    Ok(Explorer::new(Arc::new(directory), config))
}

fn print_graph(response: &GraphResponse, format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    match response.kind {
        ResponseKind::Empty => {
            println!("(no results)");
        }
        ResponseKind::Disambiguation => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Unique Id", "Name"]);
            for candidate in &response.candidates {
                table.add_row(vec![candidate.id.clone(), candidate.display_name.clone()]);
            }
            println!("{}", table);
            println!("{} candidate(s); pick one with `select <unique id>`", response.candidates.len());
        }
        ResponseKind::Tree | ResponseKind::Aggregation => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Node", "Group", "Links To"]);
            for node in response.graph.nodes() {
                let targets: Vec<&str> = response
                    .graph
                    .links()
                    .iter()
                    .filter(|l| l.source == node.id)
                    .map(|l| l.target.as_str())
                    .collect();
                table.add_row(vec![node.id.to_string(), node.group.to_string(), targets.join(", ")]);
            }
            println!("{}", table);
            println!(
                "{} node(s), {} link(s)",
                response.graph.node_count(),
                response.graph.link_count()
            );
            if response.truncated {
                println!("Graph truncated: search again from a lower node to see the rest");
            }
        }
    }

    Ok(())
}

fn print_details(details: &NodeDetails, format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(details)?);
        return Ok(());
    }

    println!("Name:       {}", details.name);
    println!("Reports To: {}", details.reports_to.as_deref().unwrap_or("-"));
    println!("Title:      {}", details.title);
    println!("Location:   {}", details.location);
    println!("Org Unit:   {}", details.org_unit);
    if let Some(custom) = &details.custom {
        println!("Email:      {}", custom.email);
        println!("Skills:     {}", custom.skills);
        println!("Team:       {}", custom.team_description);
    }
    Ok(())
}
