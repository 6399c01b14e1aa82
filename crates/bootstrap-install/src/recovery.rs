//! What to do after a failed attempt.

use crate::controller::CommitController;
use crate::report::Outcome;
use crate::source::PayloadSource;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Delete whatever reached the final location and run again.
    Retry,
    /// Report the error to the caller.
    Abort,
}

/// Decides, per failure, whether another attempt is made.
///
/// `attempt` starts at 1 for the first failure.
pub trait Recovery {
    fn on_failure(&mut self, attempt: u32, error: &Error) -> RecoveryAction;
}

impl<F> Recovery for F
where
    F: FnMut(u32, &Error) -> RecoveryAction,
{
    fn on_failure(&mut self, attempt: u32, error: &Error) -> RecoveryAction {
        self(attempt, error)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AbortOnFailure;

impl Recovery for AbortOnFailure {
    fn on_failure(&mut self, _attempt: u32, _error: &Error) -> RecoveryAction {
        RecoveryAction::Abort
    }
}

/// Retry up to `retries` times after the first failure.
#[derive(Clone, Copy, Debug)]
pub struct RetryLimit {
    retries: u32,
}

impl RetryLimit {
    pub fn new(retries: u32) -> Self {
        Self { retries }
    }
}

impl Recovery for RetryLimit {
    fn on_failure(&mut self, attempt: u32, _error: &Error) -> RecoveryAction {
        if attempt <= self.retries {
            RecoveryAction::Retry
        } else {
            RecoveryAction::Abort
        }
    }
}

/// Run `controller` until it succeeds or `policy` gives up.
pub fn run_with_recovery<S, P>(controller: &mut CommitController, source: &S, policy: &mut P) -> Result<Outcome>
where
    S: PayloadSource,
    P: Recovery + ?Sized,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let error = match controller.run(source) {
            Ok(outcome) => return Ok(outcome),
            Err(e) => e,
        };

        match policy.on_failure(attempt, &error) {
            RecoveryAction::Abort => return Err(error),
            RecoveryAction::Retry => {
                let final_path = controller.target().final_path();
                tracing::warn!(attempt, error = %error, path = %final_path.display(), "retrying install");
                // the next attempt purges again, so a failed delete is not fatal here
                if let Err(e) = bootstrap_fs::remove_all(final_path) {
                    tracing::warn!(error = %e, "could not clear final location before retry");
                }
            }
        }
    }
}
