//! Archive extraction into a staging root.
//!
//! # Architecture
//!
//! - `reader.rs` - lazy, forward-only entry reader
//! - `sanitize.rs` - entry and link path validation (zip-slip prevention)
//! - `manifest.rs` - symlink manifest parsing
//! - `extract.rs` - materializes entries under the staging root
//! - `options.rs` - manifest name and executable whitelist

pub use entry::ArchiveEntry;
pub use error::{Error, Result};
pub use extract::{Extracted, extract_to_staging};
pub use manifest::{MANIFEST_NAME, SYMLINK_SEPARATOR, SymlinkSpec, parse_manifest, read_manifest};
pub use options::{DEFAULT_EXECUTABLE_PREFIXES, ExtractOptions};
pub use reader::ArchiveReader;
pub use report::ExtractReport;

mod entry;
mod error;
mod extract;
pub mod manifest;
mod options;
mod reader;
mod report;
pub mod sanitize;
