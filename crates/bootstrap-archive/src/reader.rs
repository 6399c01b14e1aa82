use std::io::{self, Cursor, Read};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::sanitize;

/// Signature of the end-of-central-directory record, which is all an empty
/// archive contains.
const END_OF_CENTRAL_DIRECTORY: [u8; 4] = *b"PK\x05\x06";

/// Forward-only reader over the entries of a ZIP archive.
///
/// Local headers are read front to back and the stream is never seeked, so
/// an intact entry is handed out even when a later one is corrupt. Corruption
/// surfaces at the entry where it occurs, either from `next_entry` or while
/// reading that entry's content. Re-reading requires a new reader.
pub struct ArchiveReader<R: Read> {
    stream: Peeked<R>,
    index: usize,
    started: bool,
    exhausted: bool,
}

impl<B: AsRef<[u8]>> ArchiveReader<Cursor<B>> {
    pub fn from_bytes(bytes: B) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: Peeked {
                head: Cursor::new(Vec::new()),
                inner: reader,
            },
            index: 0,
            started: false,
            exhausted: false,
        }
    }

    pub fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            match self.stream.peek_signature() {
                Ok(signature) if signature == END_OF_CENTRAL_DIRECTORY => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(Error::corrupt("start of archive", e)));
                }
            }
        }

        let index = self.index;
        self.index += 1;

        let file = match zip::read::read_zipfile_from_stream(&mut self.stream) {
            Ok(Some(file)) => file,
            // central directory reached, no more local entries
            Ok(None) => {
                self.exhausted = true;
                return None;
            }
            Err(e) => {
                self.exhausted = true;
                return Some(Err(Error::corrupt(format!("entry #{index}"), e)));
            }
        };

        let name = file.name().to_string();
        let path = match sanitize::entry_path(&name) {
            Ok(path) => path,
            Err(e) => return Some(Err(e)),
        };

        if file.is_dir() {
            return Some(Ok(ArchiveEntry::directory(name, path)));
        }
        let size = file.size();
        Some(Ok(ArchiveEntry::file(name, path, size, Box::new(file))))
    }
}

/// The underlying stream with the bytes of an already inspected signature
/// put back in front of it.
struct Peeked<R> {
    head: Cursor<Vec<u8>>,
    inner: R,
}

impl<R: Read> Peeked<R> {
    fn peek_signature(&mut self) -> io::Result<[u8; 4]> {
        let mut signature = [0u8; 4];
        self.inner.read_exact(&mut signature)?;
        self.head = Cursor::new(signature.to_vec());
        Ok(signature)
    }
}

impl<R: Read> Read for Peeked<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.head.read(buf)?;
        if read > 0 {
            return Ok(read);
        }
        self.inner.read(buf)
    }
}
