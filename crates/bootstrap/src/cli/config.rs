use anyhow::{Context, Result};
use bootstrap_install::InstallConfig;

#[derive(Clone, Debug, clap::Args)]
pub struct ConfigArg {}

impl ConfigArg {
    pub fn run(self, config: InstallConfig) -> Result<()> {
        let text = config.to_toml().context("failed to render configuration")?;
        print!("{text}");
        Ok(())
    }
}
