//! tally-server
//!
//! Demo HTTP service: a few static routes, per-route request counters, and a
//! `/metrics` endpoint in the Prometheus text format.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tally_core::error::{Result, TallyError};
use tally_core::Registry;
use tally_server::{app_state, cli::Cli, router, server};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, code = err.code().as_str(), "tally-server fatal error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.resolve_config()?;

    let registry = Arc::new(Registry::new());
    let state = app_state::AppState::new(Arc::clone(&registry))?;
    let app = router::build_router(state);

    let listener = server::bind_first(&cfg.server.listen_addrs()).await?;
    let listen = listener
        .local_addr()
        .map_err(|e| TallyError::Internal(format!("listener address: {e}")))?;
    tracing::info!(%listen, "tally-server starting");

    server::serve(listener, app, cfg.server.shutdown_grace()).await
}
