use crate::{Error, Result};
use std::io;
use std::path::Path;

/// What the final location holds before an install attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallationState {
    /// Nothing usable; a fresh install is required.
    Absent,
    /// A non-empty directory; treated as installed.
    Present,
    /// Something other than a directory. It is purged before installing.
    Indeterminate,
}

/// Classify `final_path`.
///
/// A directory whose only entry is the scratch directory `scratch` counts
/// as absent, since that directory may be created before any install ran.
pub fn check(final_path: &Path, scratch: &str) -> Result<InstallationState> {
    let access = |source: io::Error| Error::Access {
        path: final_path.to_path_buf(),
        source,
    };

    let metadata = match std::fs::metadata(final_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // metadata follows symlinks, a dangling one lands here
            if std::fs::symlink_metadata(final_path).is_ok() {
                tracing::info!(path = %final_path.display(), "final location is a dangling symlink");
                return Ok(InstallationState::Indeterminate);
            }
            return Ok(InstallationState::Absent);
        }
        Err(e) => return Err(access(e)),
    };

    if !metadata.is_dir() {
        tracing::info!(path = %final_path.display(), "final location is not a directory");
        return Ok(InstallationState::Indeterminate);
    }

    let mut entries = std::fs::read_dir(final_path).map_err(access)?;
    let first = match entries.next() {
        None => {
            tracing::info!(path = %final_path.display(), "final location is empty");
            return Ok(InstallationState::Absent);
        }
        Some(entry) => entry.map_err(access)?,
    };

    match entries.next() {
        Some(Err(e)) => Err(access(e)),
        Some(Ok(_)) => Ok(InstallationState::Present),
        None if first.file_name() == scratch && first.path().is_dir() => {
            tracing::info!(
                path = %final_path.display(),
                scratch,
                "final location only holds the scratch directory"
            );
            Ok(InstallationState::Absent)
        }
        None => Ok(InstallationState::Present),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_is_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(check(&dir.path().join("usr"), "tmp").unwrap(), InstallationState::Absent);
    }

    #[test]
    fn test_empty_dir_is_absent() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::fs::create_dir(&usr).unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Absent);
    }

    #[test]
    fn test_scratch_only_is_absent() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::fs::create_dir_all(usr.join("tmp")).unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Absent);
    }

    #[test]
    fn test_scratch_named_file_is_present() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::fs::create_dir(&usr).unwrap();
        std::fs::write(usr.join("tmp"), b"").unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Present);
    }

    #[test]
    fn test_populated_is_present() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::fs::create_dir_all(usr.join("tmp")).unwrap();
        std::fs::create_dir_all(usr.join("bin")).unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Present);
    }

    #[test]
    fn test_file_is_indeterminate() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::fs::write(&usr, b"junk").unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Indeterminate);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_indeterminate() {
        let dir = tempdir().unwrap();
        let usr = dir.path().join("usr");
        std::os::unix::fs::symlink(dir.path().join("gone"), &usr).unwrap();
        assert_eq!(check(&usr, "tmp").unwrap(), InstallationState::Indeterminate);
    }
}
