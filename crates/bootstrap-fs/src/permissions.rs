use crate::{Error, Result};
use std::path::Path;

/// Permission mode applied to a path after it has been written.
///
/// On Unix the mode bits are set verbatim. On other platforms every mode
/// is a no-op, since executability is not carried in permission bits there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Leave whatever the process umask produced.
    #[default]
    Inherit,

    /// Owner may read, write and execute; group and world get nothing.
    ///
    /// On Unix: `0o700` (rwx------)
    OwnerExecutable,
}

impl PermissionMode {
    /// Apply the permission mode to a file or directory path.
    ///
    /// # Errors
    /// Returns [`Error::Permissions`] if the path does not exist or the mode
    /// cannot be set.
    pub fn apply_to_path(self, path: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let Some(mode) = self.to_unix_mode() else {
                return Ok(());
            };
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
                Error::Permissions {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        #[cfg(not(unix))]
        {
            let _ = path;
        }

        Ok(())
    }

    /// The Unix mode bits for this permission, `None` for `Inherit`.
    pub fn to_unix_mode(self) -> Option<u32> {
        match self {
            Self::Inherit => None,
            Self::OwnerExecutable => Some(0o700),
        }
    }

    pub fn is_executable(self) -> bool {
        self.to_unix_mode().is_some_and(|mode| mode & 0o111 != 0)
    }
}
