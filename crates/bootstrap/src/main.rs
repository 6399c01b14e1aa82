mod cli;
mod logging;

use anyhow::{Context, Result};
use bootstrap_install::InstallConfig;
use clap::Parser;
use cli::app::{App, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let app = App::parse();
    logging::init(app.verbose);

    let config = InstallConfig::load(app.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    match app.cmd {
        Commands::Install(arg) => arg.run(config).await,
        Commands::Status(arg) => arg.run(config),
        Commands::Link(arg) => arg.run(config),
        Commands::Config(arg) => arg.run(config),
    }
}
