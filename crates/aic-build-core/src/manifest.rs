//! Extension manifest reading for the packager.

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::Result;

/// The manifest fields the packager consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestInfo {
    /// Product name
    pub name: String,
    /// Extension version
    pub version: String,
}

impl ManifestInfo {
    /// Read name and version back from a written manifest file.
    pub fn read(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Release archive file name, `{name}-{version}.zip`.
    pub fn archive_file_name(&self) -> String {
        format!("{}-{}.zip", self.name, self.version)
    }
}
