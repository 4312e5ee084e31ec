//! Project layout resolution.
//!
//! Every filesystem path the orchestrator touches derives from a single
//! `Layout` value resolved once at startup from the project root.

use camino::{Utf8Path, Utf8PathBuf};

/// Resolved paths for one build run.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Project root (holds `VERSION`, `package.json`, `lerna.json`)
    pub root: Utf8PathBuf,

    /// Template document
    pub templates_file: Utf8PathBuf,

    /// Version file read when no CLI version is given
    pub version_file: Utf8PathBuf,

    /// UI sub-project root
    pub ui_dir: Utf8PathBuf,

    /// UI environment file
    pub ui_env_file: Utf8PathBuf,

    /// Background sub-project root
    pub bg_dir: Utf8PathBuf,

    /// Background config directory (`dev.env.json` / `prod.env.json`)
    pub bg_config_dir: Utf8PathBuf,

    /// Login sub-project root (support mode)
    pub login_dir: Utf8PathBuf,

    /// Settings sub-project root (support mode)
    pub settings_dir: Utf8PathBuf,

    /// Settings environment file (support mode)
    pub settings_env_file: Utf8PathBuf,

    /// Extension output directory
    pub extension_dir: Utf8PathBuf,

    /// Extension manifest file
    pub manifest_file: Utf8PathBuf,

    /// Release archive directory
    pub releases_dir: Utf8PathBuf,

    /// Top-level package metadata updated in release mode
    pub package_json: Utf8PathBuf,

    /// Lerna workspace metadata updated in release mode
    pub lerna_json: Utf8PathBuf,
}

impl Layout {
    /// Derive every path from the project root.
    pub fn from_root(root: impl AsRef<Utf8Path>) -> Self {
        let root = root.as_ref().to_owned();
        let modules = root.join("modules");
        let ui_dir = modules.join("aic-ui");
        let bg_dir = modules.join("aic-bg");
        let login_dir = modules.join("aic-ui-utils/aic_login");
        let settings_dir = modules.join("aic-ui-utils/aic_settings");
        let extension_dir = modules.join("extension");

        Self {
            templates_file: modules.join("build/templates.json"),
            version_file: root.join("VERSION"),
            ui_env_file: ui_dir.join(".env"),
            bg_config_dir: bg_dir.join("config"),
            settings_env_file: settings_dir.join(".env"),
            manifest_file: extension_dir.join("manifest.json"),
            releases_dir: root.join("releases"),
            package_json: root.join("package.json"),
            lerna_json: root.join("lerna.json"),
            ui_dir,
            bg_dir,
            login_dir,
            settings_dir,
            extension_dir,
            root,
        }
    }

    /// Background environment file for the given mode.
    pub fn bg_env_file(&self, dev: bool) -> Utf8PathBuf {
        let name = if dev { "dev.env.json" } else { "prod.env.json" };
        self.bg_config_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_root() {
        let layout = Layout::from_root("/work/aic");
        assert_eq!(layout.templates_file, "/work/aic/modules/build/templates.json");
        assert_eq!(layout.ui_env_file, "/work/aic/modules/aic-ui/.env");
        assert_eq!(layout.manifest_file, "/work/aic/modules/extension/manifest.json");
        assert_eq!(layout.package_json, "/work/aic/package.json");
        assert_eq!(layout.releases_dir, "/work/aic/releases");
    }

    #[test]
    fn test_bg_env_file_by_mode() {
        let layout = Layout::from_root("/work/aic");
        assert_eq!(
            layout.bg_env_file(true),
            "/work/aic/modules/aic-bg/config/dev.env.json"
        );
        assert_eq!(
            layout.bg_env_file(false),
            "/work/aic/modules/aic-bg/config/prod.env.json"
        );
    }
}
