//! Running an installation off the caller's thread.
//!
//! The attempt (and any retries) run on a dedicated thread. Its result is
//! delivered exactly once, either through an [`InstallHandle`] or a
//! completion callback.

use crate::controller::CommitController;
use crate::recovery::{AbortOnFailure, Recovery, run_with_recovery};
use crate::report::Outcome;
use crate::source::PayloadSource;
use crate::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

const WORKER_NAME: &str = "bootstrap-install";

pub struct Installer {
    controller: CommitController,
    recovery: Box<dyn Recovery + Send>,
}

impl Installer {
    pub fn new(controller: CommitController) -> Self {
        Self {
            controller,
            recovery: Box::new(AbortOnFailure),
        }
    }

    pub fn recovery<P: Recovery + Send + 'static>(mut self, policy: P) -> Self {
        self.recovery = Box::new(policy);
        self
    }

    pub fn controller(&self) -> &CommitController {
        &self.controller
    }

    /// Run on the current thread, applying the recovery policy.
    pub fn run<S: PayloadSource>(&mut self, source: &S) -> Result<Outcome> {
        run_with_recovery(&mut self.controller, source, self.recovery.as_mut())
    }

    /// Run on a worker thread and return a handle to its result.
    pub fn spawn<S: PayloadSource + 'static>(self, source: S) -> InstallHandle {
        let (sender, receiver) = oneshot::channel();
        let spawned = self.start(source, move |result| {
            // the receiver may be gone, nothing is waiting for the result then
            let _ = sender.send(result);
        });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to start install worker");
        }
        InstallHandle { receiver }
    }

    /// Run on a worker thread and pass the result to `on_complete` there.
    ///
    /// # Errors
    /// Returns the spawn error if the worker thread cannot be started, in
    /// which case `on_complete` is never called.
    pub fn spawn_with_callback<S, F>(self, source: S, on_complete: F) -> std::io::Result<()>
    where
        S: PayloadSource + 'static,
        F: FnOnce(Result<Outcome>) + Send + 'static,
    {
        self.start(source, on_complete)
    }

    fn start<S, F>(mut self, source: S, deliver: F) -> std::io::Result<()>
    where
        S: PayloadSource + 'static,
        F: FnOnce(Result<Outcome>) + Send + 'static,
    {
        std::thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let result = self.run(&source);
                deliver(result);
            })
            .map(|_| ())
    }
}

/// The pending result of a spawned installation.
///
/// Await it from async code, or call [`InstallHandle::wait`] from a thread
/// that is not driving an async runtime.
#[derive(Debug)]
pub struct InstallHandle {
    receiver: oneshot::Receiver<Result<Outcome>>,
}

impl InstallHandle {
    pub fn wait(self) -> Result<Outcome> {
        self.receiver.blocking_recv().unwrap_or(Err(Error::WorkerLost))
    }
}

impl Future for InstallHandle {
    type Output = Result<Outcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(Error::WorkerLost)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::InstallTarget;
    use std::sync::mpsc;
    use tempfile::tempdir;

    struct Exploding;

    impl PayloadSource for Exploding {
        type Reader = std::io::Cursor<Vec<u8>>;

        fn open(&self) -> std::io::Result<Self::Reader> {
            panic!("worker dies mid-attempt")
        }

        fn describe(&self) -> String {
            "exploding".to_string()
        }
    }

    #[test]
    fn test_wait_reports_failure() {
        let dir = tempdir().unwrap();
        let installer = Installer::new(CommitController::new(
            InstallTarget::beside(dir.path().join("usr")).unwrap(),
        ));

        let err = installer.spawn(b"garbage".to_vec()).wait().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ArchiveFormat);
    }

    #[test]
    fn test_panicking_worker_is_lost() {
        let dir = tempdir().unwrap();
        let installer = Installer::new(CommitController::new(
            InstallTarget::beside(dir.path().join("usr")).unwrap(),
        ));

        let err = installer.spawn(Exploding).wait().unwrap_err();
        assert!(matches!(err, Error::WorkerLost));
    }

    #[test]
    fn test_callback_runs_once_on_worker() {
        let dir = tempdir().unwrap();
        let installer = Installer::new(CommitController::new(
            InstallTarget::beside(dir.path().join("usr")).unwrap(),
        ));
        let (tx, rx) = mpsc::channel();

        installer
            .spawn_with_callback(b"garbage".to_vec(), move |result| {
                let name = std::thread::current().name().map(str::to_owned);
                tx.send((result.is_err(), name)).unwrap();
            })
            .unwrap();

        let (failed, name) = rx.recv().unwrap();
        assert!(failed);
        assert_eq!(name.as_deref(), Some(WORKER_NAME));
        assert!(rx.recv().is_err());
    }
}
