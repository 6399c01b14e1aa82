use crate::links::{LinkSpec, LinkTable};
use crate::target::{DEFAULT_SCRATCH_DIR, InstallTarget};
use crate::Result;
use bootstrap_archive::{DEFAULT_EXECUTABLE_PREFIXES, ExtractOptions, MANIFEST_NAME};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "BOOTSTRAP_";

/// Installer settings, layered as defaults, then a TOML file, then
/// `BOOTSTRAP_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InstallConfig {
    pub final_path: PathBuf,
    /// Defaults to a `<final>-staging` sibling of `final_path`.
    pub staging_path: Option<PathBuf>,
    pub scratch_dir: String,
    pub manifest_name: String,
    pub executable_prefixes: Vec<String>,
    /// Resolves relative `existing` paths in `links`.
    pub native_lib_dir: Option<PathBuf>,
    /// Where `links` are created. Without it the link table is unused.
    pub link_dir: Option<PathBuf>,
    pub links: Vec<LinkSpec>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            final_path: PathBuf::from("usr"),
            staging_path: None,
            scratch_dir: DEFAULT_SCRATCH_DIR.to_string(),
            manifest_name: MANIFEST_NAME.to_string(),
            executable_prefixes: DEFAULT_EXECUTABLE_PREFIXES.iter().map(|p| p.to_string()).collect(),
            native_lib_dir: None,
            link_dir: None,
            links: vec![],
        }
    }
}

impl InstallConfig {
    /// Load the layered configuration. A missing `path` is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn target(&self) -> Result<InstallTarget> {
        let target = match &self.staging_path {
            Some(staging) => InstallTarget::new(&self.final_path, staging)?,
            None => InstallTarget::beside(&self.final_path)?,
        };
        Ok(target.scratch_dir(&self.scratch_dir))
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .manifest_name(&self.manifest_name)
            .executable_prefixes(&self.executable_prefixes)
    }

    /// The configured link table, if a link directory and links are set.
    pub fn link_table(&self) -> Option<LinkTable> {
        let base_dir = self.link_dir.as_ref()?;
        if self.links.is_empty() {
            return None;
        }
        let mut table = LinkTable::new(base_dir).links(self.links.iter().cloned());
        if let Some(dir) = &self.native_lib_dir {
            table = table.native_lib_dir(dir);
        }
        Some(table)
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
