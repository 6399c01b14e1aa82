use anyhow::{Context, Result};
use bootstrap_install::{CommitController, InstallConfig, Installer, Outcome, RetryLimit};
use std::path::PathBuf;

/// Overrides for the configured locations.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct PathArgs {
    #[arg(long)]
    pub final_path: Option<PathBuf>,
    #[arg(long)]
    pub staging_path: Option<PathBuf>,
}

impl PathArgs {
    pub fn apply(&self, config: &mut InstallConfig) {
        if let Some(path) = &self.final_path {
            config.final_path = path.clone();
        }
        if let Some(path) = &self.staging_path {
            config.staging_path = Some(path.clone());
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct InstallArg {
    /// Zip payload to install
    pub payload: PathBuf,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Purge and start over this many times after a failed attempt
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Do not apply the configured link table after committing
    #[arg(long)]
    pub skip_links: bool,
}

impl InstallArg {
    pub async fn run(self, mut config: InstallConfig) -> Result<()> {
        self.paths.apply(&mut config);

        let target = config.target().context("invalid install locations")?;
        let final_path = target.final_path().to_path_buf();
        let mut controller = CommitController::new(target).options(config.extract_options());
        if !self.skip_links
            && let Some(table) = config.link_table()
        {
            controller = controller.hook(table);
        }

        let handle = Installer::new(controller)
            .recovery(RetryLimit::new(self.retries))
            .spawn(self.payload);

        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "installation failed");
                return Err(e).with_context(|| format!("failed to install into '{}'", final_path.display()));
            }
        };

        match outcome {
            Outcome::AlreadyInstalled => println!("{} is already installed", final_path.display()),
            Outcome::Installed(report) => println!(
                "installed {} files ({} bytes, {} executable) and {} symlinks into {}",
                report.extract.files,
                report.extract.bytes,
                report.extract.executables,
                report.symlinks,
                final_path.display()
            ),
        }
        Ok(())
    }
}
