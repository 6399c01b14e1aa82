use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// An entry read from the archive but not yet materialized.
///
/// The content reader borrows the archive and is only valid until the next
/// entry is requested.
pub struct ArchiveEntry<'a> {
    name: String,
    path: PathBuf,
    is_directory: bool,
    size: u64,
    content: Option<Box<dyn Read + 'a>>,
}

impl<'a> ArchiveEntry<'a> {
    pub(crate) fn directory(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            is_directory: true,
            size: 0,
            content: None,
        }
    }

    pub(crate) fn file(name: String, path: PathBuf, size: u64, content: Box<dyn Read + 'a>) -> Self {
        Self {
            name,
            path,
            is_directory: false,
            size,
            content: Some(content),
        }
    }

    /// The raw, slash-separated name as stored in the archive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sanitized path relative to the extraction root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Uncompressed content length as declared by the archive.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The content stream; `None` for directories.
    pub fn content(&mut self) -> Option<&mut (dyn Read + 'a)> {
        self.content.as_deref_mut()
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("is_directory", &self.is_directory)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
