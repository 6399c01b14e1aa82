use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Turn an archive entry name into a path relative to the staging root.
///
/// Absolute names, `..` segments and NUL bytes are rejected. `.` segments are
/// dropped, so `./` resolves to the empty path (the staging root itself).
pub fn entry_path(name: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains('\0') {
        return Err(unsafe_path(name));
    }

    let mut result = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path(name));
            }
        }
    }

    Ok(result)
}

/// Like [`entry_path`], but the result must name something below the root.
pub fn link_path(name: &str) -> Result<PathBuf> {
    let path = entry_path(name)?;
    if path.as_os_str().is_empty() {
        return Err(unsafe_path(name));
    }
    Ok(path)
}

fn unsafe_path(name: &str) -> Error {
    Error::UnsafeEntryPath {
        entry: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_path() {
        assert_eq!(entry_path("bin/tool").unwrap(), Path::new("bin/tool"));
    }

    #[test]
    fn directory_marker() {
        assert_eq!(entry_path("lib/").unwrap(), Path::new("lib"));
    }

    #[test]
    fn current_dir_segments_dropped() {
        assert_eq!(entry_path("./bin/./sh").unwrap(), Path::new("bin/sh"));
        assert_eq!(entry_path("./").unwrap(), Path::new(""));
    }

    #[test]
    fn zip_slip_protection() {
        assert!(matches!(entry_path("../etc/passwd"), Err(Error::UnsafeEntryPath { .. })));
        assert!(matches!(entry_path("bin/../../x"), Err(Error::UnsafeEntryPath { .. })));
        assert!(matches!(entry_path("/etc/passwd"), Err(Error::UnsafeEntryPath { .. })));
    }

    #[test]
    fn nul_and_empty_rejected() {
        assert!(entry_path("").is_err());
        assert!(entry_path("bin/a\0b").is_err());
    }

    #[test]
    fn link_path_must_name_something() {
        assert!(link_path("./").is_err());
        assert_eq!(link_path("libexec/run-link").unwrap(), Path::new("libexec/run-link"));
    }
}
