//! Pokedex - An interactive PokeAPI client
//!
//! Browses location areas, explores them, and catches Pokemon, with every
//! API response memoized in an expiring in-memory cache.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{Config, ExpiringCache, PokeApiClient, Repl};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its sweeper
/// 4. Run the REPL on stdin/stdout until `exit`, end of input, or Ctrl+C
/// 5. Shut the cache's sweeper down
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, api_base_url={}, http_timeout={}s",
        config.cache_ttl, config.api_base_url, config.http_timeout
    );

    let cache = ExpiringCache::new(config.cache_ttl()).context("creating response cache")?;
    let cache = Arc::new(cache);
    info!("Response cache initialized");
    let client = PokeApiClient::new(&config, cache.clone()).context("creating HTTP client")?;
    let mut repl = Repl::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let interrupted = tokio::select! {
        result = repl.run(stdin, &mut stdout) => {
            result.context("reading input")?;
            false
        }
        _ = shutdown_signal() => {
            println!();
            info!("Received Ctrl+C, shutting down...");
            true
        }
    };

    drop(repl);
    match Arc::try_unwrap(cache) {
        Ok(cache) => cache.shutdown().await,
        Err(cache) => cache.stop(),
    }

    info!("Pokedex shutdown complete");

    // The blocking stdin read cannot be cancelled and would hold the runtime open
    if interrupted {
        std::process::exit(0);
    }
    Ok(())
}

/// Waits for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
