use crate::cli::install::PathArgs;
use anyhow::Result;
use bootstrap_install::{InstallConfig, InstallationState};

#[derive(Clone, Debug, clap::Args)]
pub struct StatusArg {
    #[command(flatten)]
    pub paths: PathArgs,
}

impl StatusArg {
    pub fn run(self, mut config: InstallConfig) -> Result<()> {
        self.paths.apply(&mut config);
        let target = config.target()?;

        let state = bootstrap_install::check(target.final_path(), target.scratch_name())?;
        let label = match state {
            InstallationState::Absent => "absent",
            InstallationState::Present => "installed",
            InstallationState::Indeterminate => "indeterminate (will be replaced)",
        };
        println!("{}: {label}", target.final_path().display());
        Ok(())
    }
}
