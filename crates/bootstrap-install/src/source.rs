use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// Somewhere a payload archive can be (re)opened from.
///
/// Each attempt opens a fresh reader, so a retry after a failure starts
/// from the first entry again.
pub trait PayloadSource: Send {
    type Reader: Read;

    fn open(&self) -> io::Result<Self::Reader>;

    fn describe(&self) -> String;
}

impl PayloadSource for Arc<[u8]> {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(Arc::clone(self)))
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.len())
    }
}

impl PayloadSource for Vec<u8> {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(self.clone()))
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.len())
    }
}

impl PayloadSource for PathBuf {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        File::open(self).map(BufReader::new)
    }

    fn describe(&self) -> String {
        format!("'{}'", self.display())
    }
}
