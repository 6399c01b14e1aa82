//! Commit controller: drives one install attempt from purge to rename.
//!
//! The final location is only ever written by the closing rename, so it
//! either keeps its prior content or holds a complete tree. A failed
//! attempt leaves the staging directory on disk; the next attempt purges it.

use crate::hooks::{HookContext, HookError, InstallHook};
use crate::report::{InstallReport, Outcome};
use crate::source::PayloadSource;
use crate::state::{self, InstallationState};
use crate::target::InstallTarget;
use crate::{Error, Result};
use bootstrap_archive::{ArchiveReader, ExtractOptions, extract_to_staging};
use bootstrap_fs::{PromoteOptions, Staging};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Purging,
    Extracting,
    LinkingSymlinks,
    Promoting,
    Committed,
    Failed,
}

type Stage = fn(&dyn InstallHook, &HookContext<'_>) -> std::result::Result<(), HookError>;

pub struct CommitController {
    target: InstallTarget,
    options: ExtractOptions,
    promote: PromoteOptions,
    hooks: Vec<Box<dyn InstallHook>>,
    phase: Phase,
    failed_during: Option<Phase>,
}

impl CommitController {
    pub fn new(target: InstallTarget) -> Self {
        Self {
            target,
            options: ExtractOptions::default(),
            promote: PromoteOptions::default(),
            hooks: vec![],
            phase: Phase::Idle,
            failed_during: None,
        }
    }

    pub fn options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn promote_options(mut self, promote: PromoteOptions) -> Self {
        self.promote = promote;
        self
    }

    /// Add a hook. Hooks run in the order they were added.
    pub fn hook<H: InstallHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn target(&self) -> &InstallTarget {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The phase that was active when the last attempt failed.
    pub fn failed_during(&self) -> Option<Phase> {
        self.failed_during
    }

    /// Run one attempt against a fresh reader from `source`.
    ///
    /// Returns [`Outcome::AlreadyInstalled`] without touching the disk when
    /// the final location is already populated.
    pub fn run<S: PayloadSource>(&mut self, source: &S) -> Result<Outcome> {
        self.phase = Phase::Idle;
        self.failed_during = None;

        match self.attempt(source) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::warn!(phase = ?self.phase, error = %e, "install attempt failed");
                self.failed_during = Some(self.phase);
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    fn attempt<S: PayloadSource>(&mut self, source: &S) -> Result<Outcome> {
        let final_path = self.target.final_path().to_path_buf();
        let staging_path = self.target.staging_path().to_path_buf();

        // an installed location is only looked at, never written
        match state::check(&final_path, self.target.scratch_name())? {
            InstallationState::Present => {
                tracing::info!(path = %final_path.display(), "already installed");
                self.enter(Phase::Committed);
                return Ok(Outcome::AlreadyInstalled);
            }
            state => {
                tracing::info!(?state, path = %final_path.display(), payload = %source.describe(), "installing");
            }
        }
        self.target.preflight()?;

        let mut report = InstallReport::default();
        self.enter(Phase::Purging);
        self.notify(&report, |hook, ctx| hook.pre_purge(ctx))?;
        bootstrap_fs::remove_all(&staging_path)?;
        bootstrap_fs::remove_all(&final_path)?;

        self.enter(Phase::Extracting);
        let staging = Staging::prepare(&staging_path)?;
        let reader = source.open().map_err(|e| Error::Payload {
            payload: source.describe(),
            source: e,
        })?;
        let mut archive = ArchiveReader::new(reader);
        let extracted = extract_to_staging(&mut archive, staging.path(), &self.options)?;
        report.extract = extracted.report;
        self.notify(&report, |hook, ctx| hook.post_extract(ctx))?;

        self.enter(Phase::LinkingSymlinks);
        for spec in &extracted.symlinks {
            bootstrap_fs::symlink(&spec.source_path, staging.join(&spec.link_path))?;
            report.symlinks += 1;
        }
        self.notify(&report, |hook, ctx| hook.post_link(ctx))?;

        self.enter(Phase::Promoting);
        staging.promote(&final_path, self.promote)?;
        self.enter(Phase::Committed);
        tracing::info!(
            path = %final_path.display(),
            files = report.extract.files,
            symlinks = report.symlinks,
            bytes = report.extract.bytes,
            "installation committed"
        );

        self.notify(&report, |hook, ctx| hook.post_commit(ctx))?;
        Ok(Outcome::Installed(report))
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    fn notify(&self, report: &InstallReport, stage: Stage) -> Result<()> {
        let ctx = HookContext {
            final_path: self.target.final_path(),
            staging_path: self.target.staging_path(),
            report,
        };
        for hook in &self.hooks {
            stage(hook.as_ref(), &ctx).map_err(|e| Error::Hook {
                name: hook.name(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CommitController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitController")
            .field("target", &self.target)
            .field("phase", &self.phase)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
