use crate::cli::{config, install, link, status};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "bootstrap", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// TOML configuration file, layered under BOOTSTRAP_* variables
    #[arg(short, long, global = true, env = "BOOTSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity; RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "i", name = "install", about = "Install the payload unless already present")]
    Install(install::InstallArg),
    #[command(alias = "st", name = "status", about = "Report the state of the final location")]
    Status(status::StatusArg),
    #[command(alias = "ln", name = "link", about = "Create the configured link table")]
    Link(link::LinkArg),
    #[command(alias = "cfg", name = "config", about = "Print the effective configuration")]
    Config(config::ConfigArg),
}
