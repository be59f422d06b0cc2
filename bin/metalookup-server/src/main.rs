//! Metalookup Server
//!
//! This binary serves the metadata lookup HTTP API over a redb or
//! in-memory metadata store.

mod seed;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use metalookup_common::Config;
use metalookup_common::config::{StoreBackend, StoreConfig};
use metalookup_service::{CachePolicy, LookupService};
use metalookup_store::{InMemoryMetadataStore, MetadataStore, RedbMetadataStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "metalookup-server")]
#[command(about = "Metalookup metadata lookup server")]
#[command(version)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address for the HTTP API
    #[arg(short, long)]
    listen: Option<String>,

    /// Store backend: redb or memory
    #[arg(long)]
    backend: Option<String>,

    /// Database file for the redb backend
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// JSON file of metadata documents to import at startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Delete all stored metadata before importing and serving
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Args {
    /// Command line flags take precedence over file and environment values.
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(listen) = &self.listen {
            config.server.listen = listen
                .parse::<SocketAddr>()
                .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", listen, e))?;
        }
        if let Some(backend) = &self.backend {
            config.store.backend = backend.parse()?;
        }
        if let Some(path) = &self.data_path {
            config.store.path.clone_from(path);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.log_json {
            config.logging.json = true;
        }
        Ok(())
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn open_store(config: &StoreConfig) -> Result<Arc<dyn MetadataStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Store: in-memory (contents are lost on exit)");
            Ok(Arc::new(InMemoryMetadataStore::new()))
        }
        StoreBackend::Redb => {
            info!("Store: redb at {}", config.path.display());
            let store = RedbMetadataStore::open(&config.path).with_context(|| {
                format!("Failed to open metadata store at {}", config.path.display())
            })?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = settings::load(args.config.as_deref())?;
    args.apply(&mut config)?;

    init_logging(&config);

    info!("Starting Metalookup Server");

    let store = open_store(&config.store)?;

    if args.reset {
        store.delete_all().context("Failed to reset metadata store")?;
        info!("Metadata store reset");
    }

    if let Some(seed_path) = &args.seed {
        let imported = seed::import(store.as_ref(), seed_path)?;
        info!("Imported {} metadata documents from {}", imported, seed_path.display());
    }

    let cache_policy = CachePolicy::from(&config.cache);
    info!(
        "Cache-Control for successful lookups: max-age={}, {}",
        config.cache.max_age_secs,
        if config.cache.public { "public" } else { "private" }
    );
    let service = Arc::new(LookupService::with_cache_policy(store, cache_policy));

    let app = metalookup_api::router(service).layer(TraceLayer::new_for_http());

    let addr = config.server.listen;
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    info!("Metalookup Server shut down gracefully");

    Ok(())
}
