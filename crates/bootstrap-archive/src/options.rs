use bootstrap_fs::PermissionMode;

use crate::manifest::MANIFEST_NAME;

/// Archive-relative prefixes whose files are made owner-executable.
pub const DEFAULT_EXECUTABLE_PREFIXES: &[&str] =
    &["bin/", "libexec", "lib/apt/apt-helper", "lib/apt/methods"];

/// Extraction options.
///
/// # Example
/// ```
/// use bootstrap_archive::ExtractOptions;
///
/// let options = ExtractOptions::new()
///     .manifest_name("LINKS.txt")
///     .executable_prefixes(["bin/", "sbin/"]);
/// assert!(options.is_executable("sbin/init"));
/// assert!(!options.is_executable("share/doc.txt"));
/// ```
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub manifest_name: String,
    pub executable_prefixes: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            manifest_name: MANIFEST_NAME.to_string(),
            executable_prefixes: DEFAULT_EXECUTABLE_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    pub fn executable_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.executable_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Plain string-prefix match on the archive-relative name.
    pub fn is_executable(&self, entry_name: &str) -> bool {
        self.executable_prefixes
            .iter()
            .any(|prefix| entry_name.starts_with(prefix.as_str()))
    }

    pub fn permission_for(&self, entry_name: &str) -> PermissionMode {
        if self.is_executable(entry_name) {
            PermissionMode::OwnerExecutable
        } else {
            PermissionMode::Inherit
        }
    }

    pub fn is_manifest(&self, entry_name: &str) -> bool {
        entry_name == self.manifest_name
    }
}
