//! Context Vault service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  CONTEXT VAULT                   │
//!                    │                                                  │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ─────────────────┼─▶│   http   │──▶│ handlers │──▶│    vault    │   │
//!                    │  │  server  │   │ (router) │   │   service   │   │
//!                    │  └──────────┘   └──────────┘   └──────┬──────┘   │
//!                    │                                       │          │
//!                    │                                       ▼          │
//!   Client Response  │  ┌──────────┐   ┌────────────┐  ┌─────────────┐  │
//!   ◀────────────────┼──│ response │◀──│ translator │◀─│  upstream   │◀─┼── Table store
//!                    │  │  errors  │   │ (envelope) │  │   client    │  │   (REST)
//!                    │  └──────────┘   └────────────┘  └─────────────┘  │
//!                    │                                                  │
//!                    │   config · observability · lifecycle             │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use context_vault::config::load_config;
use context_vault::lifecycle;
use context_vault::observability::logging;

#[derive(Parser)]
#[command(name = "context-vault", version, about = "HTTP facade over a hosted table store")]
struct Args {
    /// Optional TOML config file; SUPABASE_URL and SUPABASE_SERVICE_KEY override it.
    #[arg(short, long, env = "VAULT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Missing upstream URL or credential ends the process here, before any socket is bound.
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "context-vault starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        table = %config.upstream.table,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
