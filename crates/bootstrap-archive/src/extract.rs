use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bootstrap_fs::{ensure_dir, ensure_parent};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::manifest::{self, SymlinkSpec};
use crate::options::ExtractOptions;
use crate::reader::ArchiveReader;
use crate::report::ExtractReport;

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Extraction results.
#[derive(Debug)]
pub struct Extracted {
    /// Links collected from the manifest, in manifest order, not yet created.
    pub symlinks: Vec<SymlinkSpec>,
    pub report: ExtractReport,
}

/// Materialize every archive entry under `staging`.
///
/// Entries are processed strictly in archive order and parent directories are
/// created on demand, so the archive need not list parents before children.
/// The manifest entry is parsed instead of written, and each link's parent
/// directory is created right away. Symlinks themselves are left to the caller.
pub fn extract_to_staging<R: Read>(
    reader: &mut ArchiveReader<R>,
    staging: &Path,
    options: &ExtractOptions,
) -> Result<Extracted> {
    let mut symlinks = Vec::new();
    let mut report = ExtractReport::default();

    while let Some(entry) = reader.next_entry() {
        let mut entry = entry?;
        report.entries += 1;

        if options.is_manifest(entry.name()) {
            let specs = read_links(&mut entry, staging)?;
            tracing::debug!(links = specs.len(), "symlink manifest parsed");
            symlinks.extend(specs);
            continue;
        }

        let target = staging.join(entry.path());
        if entry.is_directory() {
            ensure_dir(&target)?;
            report.directories += 1;
            continue;
        }

        ensure_parent(&target)?;
        report.bytes += write_file(&mut entry, &target)?;
        report.files += 1;

        let mode = options.permission_for(entry.name());
        if mode.is_executable() {
            mode.apply_to_path(&target)?;
            report.executables += 1;
        }
        tracing::trace!(entry = entry.name(), "extracted");
    }

    if symlinks.is_empty() {
        return Err(Error::MissingManifest {
            name: options.manifest_name.clone(),
        });
    }

    Ok(Extracted { symlinks, report })
}

fn read_links(entry: &mut ArchiveEntry<'_>, staging: &Path) -> Result<Vec<SymlinkSpec>> {
    let name = entry.name().to_string();
    let Some(content) = entry.content() else {
        return Err(Error::corrupt(format!("entry '{name}'"), "manifest is a directory"));
    };
    let specs = manifest::read_manifest(content, &name)?;
    for spec in &specs {
        ensure_dir(staging.join(spec.link_parent()))?;
    }
    Ok(specs)
}

/// Stream the entry content into `target`, truncating anything already there.
/// Read failures are archive corruption, write failures are extraction errors.
fn write_file(entry: &mut ArchiveEntry<'_>, target: &Path) -> Result<u64> {
    let io_error = |source| Error::ExtractionIo {
        path: target.to_path_buf(),
        source,
    };
    let location = format!("entry '{}'", entry.name());

    let mut file = File::create(target).map_err(io_error)?;
    let Some(content) = entry.content() else {
        return Ok(0);
    };

    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;
    loop {
        let read = match content.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::corrupt(location, e)),
        };
        file.write_all(&buffer[..read]).map_err(io_error)?;
        written += read as u64;
    }
    file.flush().map_err(io_error)?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn archive(entries: &[(&str, Option<&str>)]) -> ArchiveReader<Cursor<Vec<u8>>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            match content {
                Some(text) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(text.as_bytes()).unwrap();
                }
                None => writer.add_directory(*name, options).unwrap(),
            }
        }
        ArchiveReader::from_bytes(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn parent_created_without_directory_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[
            ("bin/tool", Some("tool")),
            ("SYMLINKS.txt", Some("tool←bin/alias")),
        ]);

        let extracted = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap();

        assert!(dir.path().join("bin").is_dir());
        assert_eq!(std::fs::read_to_string(dir.path().join("bin/tool")).unwrap(), "tool");
        assert_eq!(extracted.report.files, 1);
        assert_eq!(extracted.report.directories, 0);
        assert_eq!(extracted.report.bytes, 4);
        assert_eq!(extracted.report.entries, 2);
    }

    #[test]
    fn manifest_not_materialized_and_link_parents_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[("SYMLINKS.txt", Some("/system/real-run←libexec/deep/run-link"))]);

        let extracted = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap();

        assert!(!dir.path().join("SYMLINKS.txt").exists());
        assert!(dir.path().join("libexec/deep").is_dir());
        assert!(!dir.path().join("libexec/deep/run-link").exists());
        assert_eq!(extracted.symlinks.len(), 1);
    }

    #[test]
    fn missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[("lib/", None), ("bin/sh", Some("sh"))]);

        let err = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingManifest { ref name } if name == "SYMLINKS.txt"));
    }

    #[test]
    fn empty_manifest_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[("bin/sh", Some("sh")), ("SYMLINKS.txt", Some(""))]);

        let err = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingManifest { .. }));
    }

    #[test]
    fn malformed_manifest_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[
            ("SYMLINKS.txt", Some("a←b\na←b←c")),
            ("bin/late", Some("never written")),
        ]);

        let err = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedManifest { line_number: 2, .. }));
        assert!(!dir.path().join("bin/late").exists());
    }

    #[test]
    fn custom_manifest_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[("LINKS", Some("a←b"))]);
        let options = ExtractOptions::new().manifest_name("LINKS");

        let extracted = extract_to_staging(&mut reader, dir.path(), &options).unwrap();
        assert_eq!(extracted.symlinks[0].link_path, Path::new("b"));
    }

    #[test]
    fn existing_file_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stale"), "old content that is longer").unwrap();
        let mut reader = archive(&[("stale", Some("new")), ("SYMLINKS.txt", Some("a←b"))]);

        extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("stale")).unwrap(), "new");
    }

    #[test]
    fn file_over_directory_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[("data/", None), ("data", Some("clash"))]);

        let err = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap_err();
        match err {
            Error::ExtractionIo { path, .. } => assert_eq!(path, dir.path().join("data")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_by_prefix() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut reader = archive(&[
            ("bin/sh", Some("#!/bin/sh")),
            ("share/doc.txt", Some("docs")),
            ("SYMLINKS.txt", Some("sh←bin/bash")),
        ]);

        let extracted = extract_to_staging(&mut reader, dir.path(), &ExtractOptions::default()).unwrap();

        let mode = |p: &str| std::fs::metadata(dir.path().join(p)).unwrap().permissions().mode();
        assert_eq!(mode("bin/sh") & 0o777, 0o700);
        assert_eq!(mode("share/doc.txt") & 0o111, 0);
        assert_eq!(extracted.report.executables, 1);
    }
}
