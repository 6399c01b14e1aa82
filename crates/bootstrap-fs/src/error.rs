use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to remove '{path}': {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to create symlink '{link}' -> '{target}': {source}")]
    Symlink {
        target: PathBuf,
        link: PathBuf,
        source: io::Error,
    },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to set permissions on '{path}': {source}")]
    Permissions { path: PathBuf, source: io::Error },
}

impl Error {
    /// Split into the acted-on path and the I/O source. For symlinks the
    /// path is the link itself, for renames the source.
    pub fn into_parts(self) -> (PathBuf, io::Error) {
        match self {
            Self::CreateDir { path, source }
            | Self::Remove { path, source }
            | Self::Permissions { path, source } => (path, source),
            Self::Symlink { link, source, .. } => (link, source),
            Self::Rename { from, source, .. } => (from, source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
