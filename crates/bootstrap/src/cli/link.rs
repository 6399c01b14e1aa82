use anyhow::{Result, bail};
use bootstrap_install::InstallConfig;
use std::path::PathBuf;

#[derive(Clone, Debug, clap::Args)]
pub struct LinkArg {
    /// Create links here instead of the configured link_dir
    #[arg(long)]
    pub link_dir: Option<PathBuf>,
}

impl LinkArg {
    pub fn run(self, mut config: InstallConfig) -> Result<()> {
        if let Some(dir) = self.link_dir {
            config.link_dir = Some(dir);
        }
        let Some(table) = config.link_table() else {
            bail!("no link table configured (set link_dir and [[links]])");
        };

        let report = table.apply()?;
        println!(
            "{}: {} created, {} already present",
            table.base_dir().display(),
            report.created,
            report.skipped
        );
        Ok(())
    }
}
