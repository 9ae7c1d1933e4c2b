//! Pokedex - an interactive PokeAPI client
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging (stderr)
//! 2. Load configuration from environment variables
//! 3. Create the response cache and its sweep task
//! 4. Build the PokeAPI client and the command registry
//! 5. Run the REPL on stdin/stdout until `exit` or end of input
//! 6. Stop the cache sweep task

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{CommandRegistry, Config, PokeApiClient, Repl, Session, TtlCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way of the prompt;
    // override with RUST_LOG (e.g. RUST_LOG=pokedex=debug to see cache hits)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, api_url={}, request_timeout={}s",
        config.cache_ttl, config.api_url, config.request_timeout
    );

    let cache = Arc::new(TtlCache::new(config.cache_ttl()));
    let client = PokeApiClient::new(&config, Arc::clone(&cache))
        .context("failed to build HTTP client")?;

    let mut repl = Repl::new(CommandRegistry::standard(), client, Session::new());
    repl.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("terminal I/O failed")?;

    cache.shutdown().await;
    info!("Pokedex closed");
    Ok(())
}
