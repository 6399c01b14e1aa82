/// Counters collected while materializing entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub entries: usize,
    pub directories: usize,
    pub files: usize,
    pub executables: usize,
    pub bytes: u64,
}
