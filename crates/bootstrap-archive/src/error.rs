use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("corrupt archive at {location}: {reason}")]
    ArchiveFormat { location: String, reason: String },

    #[error("entry path '{entry}' is absolute or escapes the staging root")]
    UnsafeEntryPath { entry: String },

    #[error("archive contains no usable '{name}' manifest entry")]
    MissingManifest { name: String },

    #[error("malformed symlink manifest line {line_number}: '{line}'")]
    MalformedManifest { line_number: usize, line: String },

    #[error("symlink manifest is not valid UTF-8")]
    ManifestEncoding,

    #[error("failed to extract '{path}': {source}")]
    ExtractionIo { path: PathBuf, source: io::Error },
}

impl Error {
    pub(crate) fn corrupt(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::ArchiveFormat {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<bootstrap_fs::Error> for Error {
    fn from(e: bootstrap_fs::Error) -> Self {
        let (path, source) = e.into_parts();
        Self::ExtractionIo { path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
