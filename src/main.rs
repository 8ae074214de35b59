use anyhow::Context;
use clap::Parser;

use pantry_lib::bootstrap::{init_tracing_subscriber, resolve_config, wire_dependencies};
use pantry_lib::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing_subscriber(&config.log_dir)?;
    tracing::debug!(?config, "Configuration loaded");

    let data_dir = dirs::data_local_dir()
        .map(|dir| dir.join("pantry"))
        .unwrap_or_else(|| ".pantry".into());
    let app = wire_dependencies(&config, data_dir).context("Failed to wire dependencies")?;

    run(cli.command, &app).await
}
