use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_SCRATCH_DIR: &str = "tmp";

const STAGING_SUFFIX: &str = "-staging";

/// The pair of directories an installation moves between.
///
/// `staging_path` is filled and then renamed onto `final_path`, so both
/// must live on the same filesystem and neither may contain the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallTarget {
    final_path: PathBuf,
    staging_path: PathBuf,
    scratch_dir: String,
}

impl InstallTarget {
    pub fn new(final_path: impl Into<PathBuf>, staging_path: impl Into<PathBuf>) -> Result<Self> {
        let final_path = final_path.into();
        let staging_path = staging_path.into();

        if final_path.as_os_str().is_empty() || staging_path.as_os_str().is_empty() {
            return Err(Error::InvalidTarget("paths must not be empty".to_string()));
        }

        let final_abs = absolute(&final_path)?;
        let staging_abs = absolute(&staging_path)?;
        if final_abs == staging_abs {
            return Err(Error::InvalidTarget(format!(
                "staging and final location are both '{}'",
                final_path.display()
            )));
        }
        if final_abs.starts_with(&staging_abs) || staging_abs.starts_with(&final_abs) {
            return Err(Error::InvalidTarget(format!(
                "'{}' and '{}' are nested",
                staging_path.display(),
                final_path.display()
            )));
        }

        Ok(Self {
            final_path,
            staging_path,
            scratch_dir: DEFAULT_SCRATCH_DIR.to_string(),
        })
    }

    /// Stage next to `final_path`, in a sibling named `<name>-staging`.
    pub fn beside(final_path: impl Into<PathBuf>) -> Result<Self> {
        let final_path = final_path.into();
        let Some(name) = final_path.file_name() else {
            return Err(Error::InvalidTarget(format!(
                "'{}' has no final component",
                final_path.display()
            )));
        };
        let mut staging_name = name.to_os_string();
        staging_name.push(STAGING_SUFFIX);
        let staging_path = final_path.with_file_name(staging_name);
        Self::new(final_path, staging_path)
    }

    /// Name of the directory that may exist alone in an otherwise empty
    /// final location without counting as an installation.
    pub fn scratch_dir(mut self, name: impl Into<String>) -> Self {
        self.scratch_dir = name.into();
        self
    }

    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    pub fn scratch_name(&self) -> &str {
        &self.scratch_dir
    }

    /// Make sure both parents exist and that a rename between the two
    /// locations can succeed.
    pub fn preflight(&self) -> Result<()> {
        let final_parent = parent_of(&self.final_path);
        let staging_parent = parent_of(&self.staging_path);

        bootstrap_fs::ensure_dir(&final_parent)?;
        bootstrap_fs::ensure_dir(&staging_parent)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;

            let stat = |path: &Path| {
                std::fs::metadata(path).map_err(|source| Error::Access {
                    path: path.to_path_buf(),
                    source,
                })
            };
            if stat(&final_parent)?.dev() != stat(&staging_parent)?.dev() {
                return Err(Error::InvalidTarget(format!(
                    "'{}' and '{}' are on different filesystems",
                    staging_parent.display(),
                    final_parent.display()
                )));
            }
        }

        tracing::debug!(
            final_path = %self.final_path.display(),
            staging_path = %self.staging_path.display(),
            "install target checked"
        );
        Ok(())
    }
}

fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Absolute, lexically normalized form used only for comparisons.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = std::path::absolute(path).map_err(|source| Error::Access {
        path: path.to_path_buf(),
        source,
    })?;

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
