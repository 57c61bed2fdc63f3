//! Balance-sheet proxy.
//!
//! ```text
//!   Browser (allowed origin)          balance-proxy                    Accounting API
//!   ────────────────────────   ┌──────────────────────────┐   ──────────────────────────
//!   GET /balancesheet ────────▶│ request id → trace → CORS│
//!                              │   → handler ─────────────┼──▶ GET /api.xro/2.0/Reports/
//!                              │                          │        BalanceSheet
//!   200 JSON / {"detail"} ◀────│ ◀── map status / errors ─┼─── JSON | error | timeout
//!                              └──────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use balance_proxy::config::{resolve_config, Overrides};
use balance_proxy::lifecycle;
use balance_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "balance-proxy")]
#[command(about = "Relays the accounting API balance-sheet report to the browser", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8000.
    #[arg(long)]
    bind: Option<String>,

    /// Upstream accounting API base URL.
    #[arg(long)]
    upstream: Option<String>,

    /// The one browser origin allowed by CORS.
    #[arg(long)]
    allowed_origin: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind_address: self.bind.clone(),
            upstream_url: self.upstream.clone(),
            allowed_origin: self.allowed_origin.clone(),
            log_level: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), [Overrides::from_env(), cli.overrides()])?;

    init_logging(&config.observability.log_level)?;
    tracing::info!("balance-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
