use crate::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Create `link` pointing at `target`.
///
/// The target is not required to exist. An existing entry at `link` is an error.
pub fn symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    let link = link.as_ref();
    create(target, link).map_err(|e| Error::Symlink {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
        source: e,
    })
}

/// Create `link` pointing at `target` unless something already occupies `link`.
///
/// Returns `true` if the link was created, `false` if it was skipped.
pub fn symlink_if_absent(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<bool> {
    let target = target.as_ref();
    let link = link.as_ref();

    if std::fs::symlink_metadata(link).is_ok() {
        tracing::debug!(link = %link.display(), "symlink already present, skipping");
        return Ok(false);
    }

    match create(target, link) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::Symlink {
            target: target.to_path_buf(),
            link: link.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(unix)]
fn create(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
