//! Wharf Node - reference registry server.
//!
//! This is the main entry point for running a Wharf registry node.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wharf_api::{create_router, AppState};
use wharf_core::{GitIdentity, Timestamp};
use wharf_registry::ReferenceService;
use wharf_store::MemoryStore;

mod config;

use config::Config;

/// Wharf Node - source-code registry infrastructure
#[derive(Parser, Debug)]
#[command(name = "wharf-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// API listen address (overrides the config file)
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Seed a demo repository with a short history
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(listen) = args.listen {
        config.listen = listen;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    config.seed_demo |= args.seed_demo;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wharf={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Wharf node");

    let store = Arc::new(MemoryStore::new());
    if config.seed_demo {
        seed_demo(&store)?;
        tracing::info!("Seeded demo repository acme/widgets");
    }

    let service = ReferenceService::new(store);
    let router = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(listen = %config.listen, "API listening");

    axum::serve(listener, router).await?;
    Ok(())
}

/// Populates the store with a small repository so the endpoints have
/// something to answer with out of the box.
fn seed_demo(store: &MemoryStore) -> anyhow::Result<()> {
    store.create_repository("acme", "widgets")?;

    let alice = GitIdentity::new("Alice", "alice@example.com", Timestamp::now());
    let mut last = None;
    for message in ["add scaffolding", "wire up gears", "polish casing"] {
        last = Some(store.push_commit("acme", "widgets", alice.clone(), message)?);
    }

    let tip = last.expect("demo history is non-empty");
    store.set_branch("acme", "widgets", "dev", tip.id)?;
    store.set_tag("acme", "widgets", "v0.1.0", tip.id)?;
    store.set_draft("acme", "widgets", "wip", tip.id)?;
    Ok(())
}
