use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod client;
mod constants;
mod domain;
mod graph;
mod state;

#[cfg(test)]
mod test_utils;

use crate::{
    client::{HttpConfig, LedgerClient, RateLimiter},
    domain::{ExplorerError, Provider},
    graph::{GraphSnapshot, GraphSummary, NodeStats},
    state::{AppConfig, ExplorationController, FetchOutcome},
};

/// btcgraph - Incremental Bitcoin address-graph explorer
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore the transaction graph around an address
    Explore(ExploreArgs),
    /// Show the configuration, or write the defaults
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ExploreArgs {
    /// Root address
    address: String,

    /// Expand a node after the root page is loaded (repeatable)
    #[arg(short, long, value_name = "ADDRESS")]
    expand: Vec<String>,

    /// Load the next page of an expanded node (repeatable)
    #[arg(short, long, value_name = "ADDRESS")]
    more: Vec<String>,

    /// Include statistics for a node in the output (repeatable)
    #[arg(short, long, value_name = "ADDRESS")]
    stats: Vec<String>,

    /// Ledger API to query
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Override the provider's base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Minimum seconds between ledger calls
    #[arg(short, long, value_name = "SECS")]
    interval: Option<u64>,

    /// Write the graph JSON to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Retry each failed expand or load-more once before writing the graph
    #[arg(long)]
    retry_failed: bool,
}

/// Render-contract output: graph arrays plus panel data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreOutput {
    root: String,
    #[serde(flatten)]
    graph: GraphSnapshot,
    summary: GraphSummary,
    expanded: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    stats: BTreeMap<String, NodeStats>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    setup_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Explore(args) => explore(args).await,
        Commands::Config { init } => show_config(init),
    }
}

/// Logs go to stderr so stdout carries only the graph JSON.
fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn explore(args: ExploreArgs) -> Result<()> {
    let mut config = AppConfig::load();
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if args.base_url.is_some() {
        config.base_url = args.base_url;
    }
    if let Some(interval) = args.interval {
        config.min_interval_secs = interval;
    }

    let limiter = Arc::new(RateLimiter::new(config.min_interval()));
    let client = LedgerClient::with_base_url(
        config.provider,
        config.effective_base_url(),
        Arc::clone(&limiter),
        HttpConfig::with_timeout(config.request_timeout()),
    )
    .map_err(ExplorerError::into_report)?;

    tracing::info!(
        provider = %client.provider(),
        base_url = client.base_url(),
        interval_secs = limiter.min_interval().as_secs(),
        "Starting exploration"
    );

    let controller = ExplorationController::new(client);
    controller
        .set_root_address(&args.address)
        .await
        .map_err(ExplorerError::into_report)?;

    for address in &args.expand {
        report("expand", address, controller.expand_node(address).await);
    }
    for address in &args.more {
        report("load more", address, controller.load_more(address).await);
    }
    if args.retry_failed {
        for (address, result) in controller.retry_failed().await {
            report("retry", &address, result);
        }
    }

    let mut stats = BTreeMap::new();
    for address in &args.stats {
        match controller.node_stats(address).await {
            Some(node) => {
                stats.insert(address.clone(), node);
            }
            None => tracing::warn!(%address, "No such node in the graph"),
        }
    }

    let output = ExploreOutput {
        root: controller.root().await.unwrap_or_default(),
        graph: controller.snapshot().await,
        summary: controller.summary().await,
        expanded: controller.expanded_addresses().await,
        stats,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "Graph written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Failed steps are logged and skipped; the rest of the run continues.
/// Transient failures point at `--retry-failed`.
fn report(step: &str, address: &str, result: Result<FetchOutcome, ExplorerError>) {
    match result {
        Ok(FetchOutcome::Merged {
            address,
            offset,
            transactions,
            nodes_added,
            edges_added,
        }) => tracing::info!(
            step,
            %address,
            offset,
            transactions,
            nodes_added,
            edges_added,
            "Step done"
        ),
        Ok(FetchOutcome::Skipped) => tracing::info!(step, address, "Nothing to do"),
        Ok(FetchOutcome::Discarded) => tracing::info!(step, address, "Result discarded"),
        Err(err) if err.is_retryable() => tracing::warn!(
            step,
            address,
            error = %err,
            "Step failed, rerun with --retry-failed to try it again"
        ),
        Err(err) => tracing::warn!(step, address, error = %err, "Step failed"),
    }
}

fn show_config(init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    let config = if init && !path.exists() {
        let config = AppConfig::default();
        config.save()?;
        tracing::info!(path = %path.display(), "Default configuration written");
        config
    } else {
        AppConfig::load()
    };

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
