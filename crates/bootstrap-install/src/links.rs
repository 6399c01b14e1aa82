use crate::hooks::{HookContext, HookError, InstallHook};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// One link to create: `link_name` (relative to the table's base directory)
/// pointing at `existing`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkSpec {
    pub existing: PathBuf,
    pub link_name: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub created: usize,
    pub skipped: usize,
}

/// A fixed set of links created outside the payload, each only if nothing
/// occupies its name yet. Applying a table twice is harmless.
#[derive(Clone, Debug)]
pub struct LinkTable {
    base_dir: PathBuf,
    native_lib_dir: Option<PathBuf>,
    links: Vec<LinkSpec>,
}

impl LinkTable {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            native_lib_dir: None,
            links: vec![],
        }
    }

    /// Directory that relative `existing` paths are resolved against.
    pub fn native_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.native_lib_dir = Some(dir.into());
        self
    }

    pub fn link(mut self, existing: impl Into<PathBuf>, link_name: impl Into<PathBuf>) -> Self {
        self.links.push(LinkSpec {
            existing: existing.into(),
            link_name: link_name.into(),
        });
        self
    }

    pub fn links(mut self, links: impl IntoIterator<Item = LinkSpec>) -> Self {
        self.links.extend(links);
        self
    }

    pub fn entries(&self) -> &[LinkSpec] {
        &self.links
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn existing(&self, spec: &LinkSpec) -> PathBuf {
        match &self.native_lib_dir {
            Some(dir) if spec.existing.is_relative() => dir.join(&spec.existing),
            _ => spec.existing.clone(),
        }
    }

    pub fn apply(&self) -> Result<LinkReport> {
        let mut report = LinkReport::default();
        bootstrap_fs::ensure_dir(&self.base_dir)?;

        for spec in &self.links {
            let link = self.base_dir.join(relative_link_name(&spec.link_name)?);
            bootstrap_fs::ensure_parent(&link)?;

            if bootstrap_fs::symlink_if_absent(self.existing(spec), &link)? {
                report.created += 1;
            } else {
                report.skipped += 1;
            }
        }

        tracing::info!(
            base_dir = %self.base_dir.display(),
            created = report.created,
            skipped = report.skipped,
            "link table applied"
        );
        Ok(report)
    }
}

/// Normalize a link name to a non-empty path below the base directory.
/// The name is checked component by component, so non-UTF-8 names survive.
fn relative_link_name(name: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    for component in name.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidTarget(format!(
                    "link name escapes its base directory: {}",
                    name.display()
                )));
            }
        }
    }
    if result.as_os_str().is_empty() {
        return Err(Error::InvalidTarget(format!(
            "link name is empty: {}",
            name.display()
        )));
    }
    Ok(result)
}

impl InstallHook for LinkTable {
    fn name(&self) -> &'static str {
        "link_table"
    }

    fn post_commit(&self, _ctx: &HookContext<'_>) -> std::result::Result<(), HookError> {
        self.apply().map(|_| ()).map_err(|e| e.to_string().into())
    }
}
