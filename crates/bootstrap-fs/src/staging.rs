use crate::primitives::{PromoteOptions, ensure_dir, promote_dir, remove_all};
use crate::Result;
use std::path::{Path, PathBuf};

/// A freshly emptied directory that is filled in place and then promoted.
///
/// Unlike a scratch tempdir, a `Staging` is not removed on drop: a failed
/// attempt leaves its contents on disk and the next `prepare` clears them.
#[derive(Debug)]
pub struct Staging {
    path: PathBuf,
}

impl Staging {
    /// Remove anything at `path` and recreate it as an empty directory.
    pub fn prepare(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        remove_all(&path)?;
        ensure_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }

    /// Rename the staging directory to `destination`, consuming it.
    pub fn promote(self, destination: impl AsRef<Path>, options: PromoteOptions) -> Result<PathBuf> {
        let destination = destination.as_ref();
        promote_dir(&self.path, destination, options)?;
        tracing::debug!(
            from = %self.path.display(),
            to = %destination.display(),
            "staging promoted"
        );
        Ok(destination.to_path_buf())
    }
}
