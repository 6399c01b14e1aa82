use crate::{Error, Result};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct PromoteOptions {
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for PromoteOptions {
    fn default() -> Self {
        Self {
            retry_count: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl PromoteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// Atomically move the directory `src` to `dest`.
///
/// `dest` must not exist; an occupied destination is reported as
/// [`ErrorKind::AlreadyExists`] rather than replaced. Both paths must live on
/// the same filesystem, otherwise the rename fails with a cross-device error.
pub fn promote_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>, options: PromoteOptions) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    let rename_error = |source: io::Error| Error::Rename {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if std::fs::symlink_metadata(dest).is_ok() {
        return Err(rename_error(io::Error::new(
            ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    #[cfg(unix)]
    {
        let _ = options;
        std::fs::rename(src, dest).map_err(rename_error)
    }

    #[cfg(windows)]
    {
        // Indexers and scanners hold transient handles inside fresh trees.
        let mut attempts = 0;
        loop {
            match std::fs::rename(src, dest) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                    attempts += 1;
                    if attempts >= options.retry_count {
                        return Err(rename_error(e));
                    }
                    std::thread::sleep(options.retry_delay * attempts);
                }
                Err(e) => return Err(rename_error(e)),
            }
        }
    }
}
