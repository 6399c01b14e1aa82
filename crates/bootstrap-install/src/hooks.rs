//! Hook traits for the install lifecycle.
//!
//! Hooks run inside the attempt: an error from any of them fails the
//! attempt exactly like a filesystem error would.

use crate::report::InstallReport;
use std::path::Path;

pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// What a hook gets to see at each stage.
#[derive(Debug)]
pub struct HookContext<'a> {
    pub final_path: &'a Path,
    pub staging_path: &'a Path,
    /// Counts accumulated so far in the attempt.
    pub report: &'a InstallReport,
}

pub trait InstallHook: Send + Sync {
    /// Name of this hook for error reporting.
    fn name(&self) -> &'static str;

    /// Called before any existing staging or final content is removed.
    fn pre_purge(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Called once every entry is written to staging.
    fn post_extract(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after the manifest's symlinks exist in staging.
    fn post_link(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Called once the staging directory has become the final location.
    fn post_commit(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }
}
