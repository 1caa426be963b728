//! `reef` — build a routing ring from config and ask it questions.
//!
//! # Usage
//!
//! ```text
//! reef -c reef.toml query user:42 user:43     # which node owns each key
//! reef -c reef.toml nodes                     # registered nodes and replicas
//! reef --node a --node b distribution -n 50000  # key share per node
//! ```

mod config;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use reef_ring::Registry;
use tracing::{debug, info};

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "reef", version, about = "Consistent hashing request router")]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra real node to register (repeatable). Added after the config's nodes.
    #[arg(long = "node", global = true)]
    nodes: Vec<String>,

    /// Override the virtual replica count per real node.
    #[arg(long, global = true, env = "REEF_REPLICAS")]
    replicas: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the real node that owns each key.
    Query {
        /// Keys to route.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List registered real nodes and their placed replica counts.
    Nodes,

    /// Route synthetic keys and report each node's share.
    Distribution {
        /// Number of keys to route.
        #[arg(short = 'n', long, default_value = "10000")]
        count: usize,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    apply_overrides(&mut config, cli.nodes, cli.replicas);
    let registry = build_registry(&config)?;

    match cli.command {
        Commands::Query { keys } => cmd_query(&registry, &keys),
        Commands::Nodes => cmd_nodes(&registry),
        Commands::Distribution { count } => cmd_distribution(&registry, count),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI args override config file values. `--node` names go after `[nodes]`.
fn apply_overrides(config: &mut CliConfig, nodes: Vec<String>, replicas: Option<u32>) {
    config.nodes.names.extend(nodes);
    if let Some(replicas) = replicas {
        config.ring.virtual_replicas = replicas;
    }
}

/// Create the registry and register every configured node, in order.
fn build_registry(config: &CliConfig) -> Result<Registry> {
    let mut registry =
        Registry::new(config.ring.clone()).context("invalid [ring] configuration")?;

    for name in &config.nodes.names {
        let reg = registry
            .register(name)
            .with_context(|| format!("failed to register node {name:?}"))?;
        if reg.skipped() > 0 {
            info!(node = %name, skipped = reg.skipped(), "some replicas collided and were skipped");
        }
    }

    debug!(
        service = registry.service_name(),
        nodes = registry.real_node_count(),
        entries = registry.len(),
        "registry ready"
    );
    Ok(registry)
}

// -----------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------

fn cmd_query(registry: &Registry, keys: &[String]) -> Result<()> {
    if registry.is_empty() {
        bail!("no nodes registered: add [nodes] names to the config or pass --node");
    }
    for key in keys {
        let owner = registry
            .query(key)
            .with_context(|| format!("failed to route {key:?}"))?;
        println!("{key}\t{owner}");
    }
    Ok(())
}

fn cmd_nodes(registry: &Registry) -> Result<()> {
    println!(
        "service {} ({} nodes, {} ring entries)",
        registry.service_name(),
        registry.real_node_count(),
        registry.len()
    );
    for name in registry.real_nodes() {
        let replicas = registry.virtual_nodes_of(name).map_or(0, |v| v.len());
        println!(
            "  {name:<24} key={:#018x} replicas={replicas}/{}",
            registry.hash_key(name),
            registry.config().virtual_replicas
        );
    }
    Ok(())
}

fn cmd_distribution(registry: &Registry, count: usize) -> Result<()> {
    if registry.is_empty() {
        bail!("no nodes registered: add [nodes] names to the config or pass --node");
    }
    if count == 0 {
        bail!("--count must be greater than zero");
    }

    let mut shares: BTreeMap<&str, usize> = registry.real_nodes().map(|n| (n, 0)).collect();
    for i in 0..count {
        let owner = registry.query(&format!("key-{i}"))?;
        *shares.entry(owner).or_default() += 1;
    }

    let ideal = 1.0 / registry.real_node_count() as f64;
    println!("{count} keys over {} nodes (ideal share {ideal:.3})", shares.len());
    for (node, hits) in shares {
        let share = hits as f64 / count as f64;
        println!("  {node:<24} {hits:>8}  {share:.3}  ({:+.1}%)", (share / ideal - 1.0) * 100.0);
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
