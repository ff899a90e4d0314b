use anyhow::Context;
use clap::Parser;
use orgraph::directory::loader::{load_custom_csv, load_hierarchy_csv};
use orgraph::{
    CustomRecord, DirectoryConfig, DirectoryStore, Explorer, HttpServer, Identity,
    MemoryDirectory, OrgraphConfig, SqliteDirectory,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Org chart graph server
#[derive(Parser)]
#[command(name = "orgraph", version, about = "Org chart graph server")]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "ORGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = OrgraphConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Orgraph v{}", orgraph::version());

    let store = open_directory(&config.directory, config.engine.result_size)?;
    let explorer = Arc::new(Explorer::new(store, config.engine.clone()));

    let server = HttpServer::new(explorer, config.server.clone());
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))?;

    Ok(())
}

fn load_records(config: &DirectoryConfig) -> anyhow::Result<(Vec<Identity>, Vec<CustomRecord>)> {
    let identities = match &config.hierarchy_csv {
        Some(path) => load_hierarchy_csv(path)
            .with_context(|| format!("reading hierarchy from {}", path.display()))?,
        None => Vec::new(),
    };
    let custom = match &config.custom_csv {
        Some(path) => load_custom_csv(path)
            .with_context(|| format!("reading custom data from {}", path.display()))?,
        None => Vec::new(),
    };
    Ok((identities, custom))
}

fn open_directory(config: &DirectoryConfig, result_size: usize) -> anyhow::Result<Arc<dyn DirectoryStore>> {
    let (identities, custom) = load_records(config)?;

    match &config.sqlite_path {
        Some(path) => {
            let store = SqliteDirectory::open(path, config.connect_attempts)
                .with_context(|| format!("opening directory database {}", path.display()))?
                .with_result_size(result_size);
            if !identities.is_empty() || !custom.is_empty() {
                store.replace_all(&identities, &custom)?;
            }
            info!("Serving directory from {} ({} identities)", path.display(), store.identity_count()?);
            Ok(Arc::new(store))
        }
        None => {
            if identities.is_empty() {
                warn!("No hierarchy configured; every search will come back empty");
            }
            let store = MemoryDirectory::from_records(identities, custom).with_result_size(result_size);
            info!("Serving in-memory directory ({} identities)", store.len());
            Ok(Arc::new(store))
        }
    }
}
