//! Exactly-once installation of a prepackaged root filesystem.
//!
//! # Architecture
//!
//! - `state.rs` - classifies the final location before an attempt
//! - `target.rs` - staging/final pair and preflight checks
//! - `controller.rs` - purge, extract, link and promote as one attempt
//! - `hooks.rs` - lifecycle hooks run inside an attempt
//! - `recovery.rs` - retry policies across attempts
//! - `worker.rs` - background execution with a single completion
//! - `links.rs` - skip-if-present link tables outside the payload
//! - `config.rs` - layered configuration

pub use config::{ENV_PREFIX, InstallConfig};
pub use controller::{CommitController, Phase};
pub use error::{Error, ErrorKind, Result};
pub use hooks::{HookContext, HookError, InstallHook};
pub use links::{LinkReport, LinkSpec, LinkTable};
pub use recovery::{AbortOnFailure, Recovery, RecoveryAction, RetryLimit, run_with_recovery};
pub use report::{InstallReport, Outcome};
pub use source::PayloadSource;
pub use state::{InstallationState, check};
pub use target::{DEFAULT_SCRATCH_DIR, InstallTarget};
pub use worker::{InstallHandle, Installer};

pub use bootstrap_archive::{ExtractOptions, ExtractReport};
pub use bootstrap_fs::PromoteOptions;

mod config;
mod controller;
mod error;
mod hooks;
mod links;
mod recovery;
mod report;
mod source;
mod state;
mod target;
mod worker;
