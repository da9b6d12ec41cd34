//! registry-monitor - registry health-check sidecar
//!
//! Discovers registries from cluster secrets and checks each one continuously

#![allow(missing_docs)]

use clap::Parser;
use registry_monitor::cli::Cli;
use registry_monitor::utils::init_logging;
use registry_monitor::{Monitor, Result, build_info};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config().await?;
    init_logging(&config.monitor().logging)?;
    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {:?}", path);
    }
    config.warn_insecure();

    let build = build_info();
    let monitor = config.monitor();
    info!(
        version = build.version,
        git_hash = build.git_hash,
        namespace = %monitor.namespace,
        update_config_interval_sec = monitor.refresh_interval_secs,
        check_interval_sec = monitor.check_interval_secs,
        source_tagging = monitor.source_tagging(),
        "registry monitor configured"
    );

    Monitor::from_config(config).await?.run().await
}
