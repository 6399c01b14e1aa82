use bootstrap_archive::ExtractReport;

/// Counts for one committed installation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub extract: ExtractReport,
    pub symlinks: usize,
}

/// How a successful run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The final location was already populated; nothing was touched.
    AlreadyInstalled,
    Installed(InstallReport),
}

impl Outcome {
    pub fn report(&self) -> Option<&InstallReport> {
        match self {
            Self::AlreadyInstalled => None,
            Self::Installed(report) => Some(report),
        }
    }
}
