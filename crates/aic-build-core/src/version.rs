//! Version string resolution.

use camino::Utf8Path;

use crate::error::Result;

/// Resolve the build version for this run.
///
/// An explicit CLI value wins; otherwise the `VERSION` file at the project
/// root is read. Both forms are whitespace-trimmed. An empty CLI value
/// counts as absent.
pub fn resolve(cli_version: Option<&str>, version_file: &Utf8Path) -> Result<String> {
    if let Some(version) = cli_version {
        let version = version.trim();
        if !version.is_empty() {
            return Ok(version.to_string());
        }
    }
    let content = std::fs::read_to_string(version_file)?;
    Ok(content.trim().to_string())
}
