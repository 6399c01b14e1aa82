use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot access '{path}': {source}")]
    Access { path: PathBuf, source: io::Error },

    #[error("cannot open payload {payload}: {source}")]
    Payload { payload: String, source: io::Error },

    #[error("invalid installation target: {0}")]
    InvalidTarget(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),

    #[error(transparent)]
    Archive(#[from] bootstrap_archive::Error),

    #[error("failed to create symlink '{link}' -> '{target}': {source}")]
    SymlinkCreation {
        target: PathBuf,
        link: PathBuf,
        source: io::Error,
    },

    #[error("failed to purge '{path}': {source}")]
    Purge { path: PathBuf, source: io::Error },

    #[error("failed to promote '{from}' to '{to}': {source}")]
    CommitRename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("hook '{name}' failed: {message}")]
    Hook { name: &'static str, message: String },

    #[error("install worker exited without reporting a result")]
    WorkerLost,
}

/// Flat classification of [`Error`] for callers that only need to know
/// which class of failure ended the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Access,
    ArchiveFormat,
    MissingManifest,
    MalformedManifest,
    ExtractionIo,
    SymlinkCreation,
    Purge,
    CommitRename,
    Config,
    Hook,
    WorkerLost,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use bootstrap_archive::Error as Archive;

        match self {
            Self::Access { .. } | Self::Payload { .. } | Self::InvalidTarget(_) => ErrorKind::Access,
            Self::Config(_) => ErrorKind::Config,
            Self::Archive(inner) => match inner {
                Archive::ArchiveFormat { .. } | Archive::UnsafeEntryPath { .. } => ErrorKind::ArchiveFormat,
                Archive::MissingManifest { .. } => ErrorKind::MissingManifest,
                Archive::MalformedManifest { .. } | Archive::ManifestEncoding => ErrorKind::MalformedManifest,
                Archive::ExtractionIo { .. } => ErrorKind::ExtractionIo,
            },
            Self::SymlinkCreation { .. } => ErrorKind::SymlinkCreation,
            Self::Purge { .. } => ErrorKind::Purge,
            Self::CommitRename { .. } => ErrorKind::CommitRename,
            Self::Hook { .. } => ErrorKind::Hook,
            Self::WorkerLost => ErrorKind::WorkerLost,
        }
    }
}

impl From<bootstrap_fs::Error> for Error {
    fn from(e: bootstrap_fs::Error) -> Self {
        use bootstrap_fs::Error as Fs;

        match e {
            Fs::Symlink { target, link, source } => Self::SymlinkCreation { target, link, source },
            Fs::Rename { from, to, source } => Self::CommitRename { from, to, source },
            Fs::Remove { path, source } => Self::Purge { path, source },
            other => {
                let (path, source) = other.into_parts();
                Self::Access { path, source }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
