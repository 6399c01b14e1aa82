//! Symlink manifest parsing.
//!
//! ZIP has no portable way to store symlinks, so the payload lists them in a
//! reserved text entry, one per line:
//!
//! ```text
//! <target>←<link>
//! ```
//!
//! `target` is written into the link verbatim. `link` is relative to the
//! staging root. There is no escaping, no comments and no blank lines.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sanitize;

/// Reserved archive entry holding the manifest.
pub const MANIFEST_NAME: &str = "SYMLINKS.txt";

/// Field separator, U+2190 LEFTWARDS ARROW.
pub const SYMLINK_SEPARATOR: &str = "\u{2190}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymlinkSpec {
    /// What the link points at.
    pub source_path: PathBuf,
    /// Where the link is created, relative to the staging root.
    pub link_path: PathBuf,
}

impl SymlinkSpec {
    /// Parse a single manifest line. `line_number` is 1-based.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self> {
        let malformed = || Error::MalformedManifest {
            line_number,
            line: line.to_string(),
        };

        let mut fields = line.split(SYMLINK_SEPARATOR);
        let (Some(source), Some(link), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };
        if [source, link]
            .iter()
            .any(|field| field.is_empty() || field.trim() != *field)
        {
            return Err(malformed());
        }

        Ok(Self {
            source_path: PathBuf::from(source),
            link_path: sanitize::link_path(link)?,
        })
    }

    /// The directory that must exist before the link can be created.
    pub fn link_parent(&self) -> &Path {
        self.link_path.parent().unwrap_or(Path::new(""))
    }
}

/// Parse manifest text, stopping at the first malformed line.
pub fn parse_manifest(text: &str) -> Result<Vec<SymlinkSpec>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| SymlinkSpec::parse_line(line, index + 1))
        .collect()
}

/// Read the manifest entry content and parse it.
pub fn read_manifest<R: Read + ?Sized>(content: &mut R, entry_name: &str) -> Result<Vec<SymlinkSpec>> {
    let mut bytes = Vec::new();
    content
        .read_to_end(&mut bytes)
        .map_err(|e| Error::corrupt(format!("entry '{entry_name}'"), e))?;
    let text = String::from_utf8(bytes).map_err(|_| Error::ManifestEncoding)?;
    parse_manifest(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_pairs_in_order() {
        let specs = parse_manifest("/system/real-run←libexec/run-link\nsh←bin/bash\n").unwrap();
        assert_eq!(
            specs,
            vec![
                SymlinkSpec {
                    source_path: PathBuf::from("/system/real-run"),
                    link_path: PathBuf::from("libexec/run-link"),
                },
                SymlinkSpec {
                    source_path: PathBuf::from("sh"),
                    link_path: PathBuf::from("bin/bash"),
                },
            ]
        );
    }

    #[test]
    fn three_fields_is_malformed() {
        let err = parse_manifest("ok←fine\na←b←c\nnever←reached").unwrap_err();
        match err {
            Error::MalformedManifest { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "a←b←c");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert!(matches!(
            parse_manifest("just-a-path"),
            Err(Error::MalformedManifest { line_number: 1, .. })
        ));
    }

    #[test]
    fn blank_line_is_malformed() {
        assert!(matches!(
            parse_manifest("a←b\n\nc←d"),
            Err(Error::MalformedManifest { line_number: 2, .. })
        ));
    }

    #[test]
    fn empty_field_is_malformed() {
        assert!(parse_manifest("a←").is_err());
        assert!(parse_manifest("←b").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_malformed() {
        assert!(parse_manifest(" a←b").is_err());
        assert!(parse_manifest("a ←b").is_err());
        assert!(parse_manifest("a←b\t").is_err());
    }

    #[test]
    fn crlf_line_endings_accepted() {
        let specs = parse_manifest("a←b\r\nc←d\r\n").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].link_path, Path::new("d"));
    }

    #[test]
    fn escaping_link_rejected() {
        assert!(matches!(
            parse_manifest("/bin/sh←../outside"),
            Err(Error::UnsafeEntryPath { .. })
        ));
        assert!(matches!(
            parse_manifest("/bin/sh←/abs/link"),
            Err(Error::UnsafeEntryPath { .. })
        ));
    }

    #[test]
    fn link_parent() {
        let spec = SymlinkSpec::parse_line("x←libexec/run-link", 1).unwrap();
        assert_eq!(spec.link_parent(), Path::new("libexec"));
        let spec = SymlinkSpec::parse_line("x←top", 1).unwrap();
        assert_eq!(spec.link_parent(), Path::new(""));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut bytes: &[u8] = &[0x61, 0xE2, 0x86, 0x62, 0xFF];
        assert!(matches!(
            read_manifest(&mut bytes, MANIFEST_NAME),
            Err(Error::ManifestEncoding)
        ));
    }

    #[test]
    fn empty_text_yields_no_links() {
        assert!(parse_manifest("").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn well_formed_lines_round_trip(
            source in "[a-zA-Z0-9_./-]{1,24}",
            link in "[a-z0-9_]{1,8}(/[a-z0-9_]{1,8}){0,3}",
        ) {
            let line = format!("{source}{SYMLINK_SEPARATOR}{link}");
            let spec = SymlinkSpec::parse_line(&line, 1).unwrap();
            prop_assert_eq!(spec.source_path, PathBuf::from(&source));
            prop_assert_eq!(spec.link_path, PathBuf::from(&link));
        }

        #[test]
        fn lines_without_exactly_one_separator_fail(
            parts in proptest::collection::vec("[a-z/]{1,8}", 1..5usize),
        ) {
            prop_assume!(parts.len() != 2);
            let line = parts.join(SYMLINK_SEPARATOR);
            let is_malformed = matches!(
                SymlinkSpec::parse_line(&line, 7),
                Err(Error::MalformedManifest { line_number: 7, .. })
            );
            prop_assert!(is_malformed);
        }
    }
}
