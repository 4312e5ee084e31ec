//! Template document loading and profile validation.

use std::collections::HashMap;

use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Ordered JSON object, as stored in the template document.
pub type JsonMap = Map<String, Value>;

/// The template document at `modules/build/templates.json`.
///
/// One category per external integration (`genesys`, `okta`), one per
/// artifact kind (`uiDefault`, `backgroundDefault`, ...), one per build
/// type, plus the extension target profiles and default manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDoc {
    /// UI `.env` defaults
    pub ui_default: JsonMap,

    /// Background config defaults
    pub background_default: JsonMap,

    /// Extra background keys applied in dev mode
    #[serde(default)]
    pub background_dev: JsonMap,

    /// Settings `.env` defaults used in support mode
    #[serde(default)]
    pub settings_dev_default: JsonMap,

    /// Per-build-type background overlays
    pub build_types: BuildTypes,

    /// Genesys profiles, keyed by name
    pub genesys: HashMap<String, JsonMap>,

    /// Okta profiles, keyed by name
    pub okta: HashMap<String, JsonMap>,

    /// Extension target profiles and the default manifest
    pub extension: ExtensionTemplates,
}

/// Background overlays selected by build type.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildTypes {
    #[serde(rename = "chrome-store")]
    pub chrome_store: JsonMap,
    pub default: JsonMap,
}

/// Extension target profiles plus the default manifest document.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionTemplates {
    /// Per-target settings, keyed by profile name
    pub settings: HashMap<String, ExtensionProfile>,

    /// Default manifest document
    pub default: JsonMap,
}

/// One extension target profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionProfile {
    /// Product name substituted into the manifest
    pub name: String,

    /// Remaining per-target keys, kept but not consumed by the orchestrator
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl TemplateDoc {
    /// Load and parse the template document.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::templates_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Look up a Genesys profile overlay.
    pub fn genesys_profile(&self, name: &str) -> Result<&JsonMap> {
        self.genesys
            .get(name)
            .ok_or_else(|| Error::unknown_profile("genesys", name))
    }

    /// Look up an Okta profile overlay.
    pub fn okta_profile(&self, name: &str) -> Result<&JsonMap> {
        self.okta
            .get(name)
            .ok_or_else(|| Error::unknown_profile("okta", name))
    }

    /// Look up an extension target profile.
    pub fn extension_profile(&self, name: &str) -> Result<&ExtensionProfile> {
        self.extension
            .settings
            .get(name)
            .ok_or_else(|| Error::unknown_profile("extension", name))
    }

    /// Validate the three user-selected profile names.
    ///
    /// All-or-nothing gate for the config stage: nothing may be written
    /// unless every name resolves.
    pub fn validate_selection(&self, genesys: &str, okta: &str, extension: &str) -> Result<()> {
        self.genesys_profile(genesys)?;
        self.okta_profile(okta)?;
        self.extension_profile(extension)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "uiDefault": {"REACT_APP_API": "https://api.example.com"},
        "backgroundDefault": {"LOG_LEVEL": "warn"},
        "backgroundDev": {"LOG_LEVEL": "debug"},
        "settingsDevDefault": {"SETTINGS_FLAG": true},
        "buildTypes": {
            "chrome-store": {"UPDATE_URL": "https://clients2.google.com/service/update2/crx"},
            "default": {"UPDATE_URL": ""}
        },
        "genesys": {"stage": {"GENESYS_URL": "https://stage.genesys.example"}},
        "okta": {"stage": {"OKTA_URL": "https://stage.okta.example"}},
        "extension": {
            "settings": {"stage": {"name": "AIC Extension (Stage)"}},
            "default": {"manifest_version": 2, "permissions": ["storage"]}
        }
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let doc: TemplateDoc = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.genesys.len(), 1);
        assert_eq!(
            doc.extension.settings["stage"].name,
            "AIC Extension (Stage)"
        );
        assert!(doc.build_types.chrome_store.contains_key("UPDATE_URL"));
    }

    #[test]
    fn test_validate_selection_ok() {
        let doc: TemplateDoc = serde_json::from_str(SAMPLE).unwrap();
        assert!(doc.validate_selection("stage", "stage", "stage").is_ok());
    }

    #[test]
    fn test_validate_selection_unknown_profile() {
        let doc: TemplateDoc = serde_json::from_str(SAMPLE).unwrap();
        let err = doc.validate_selection("stage", "prod", "stage").unwrap_err();
        assert!(
            matches!(
                &err,
                Error::UnknownProfile { category: "okta", name } if name == "prod"
            ),
            "Expected UnknownProfile, got: {:?}",
            err
        );
        assert_eq!(err.to_string(), "Unknown okta profile: prod");
    }

    #[test]
    fn test_missing_category_is_parse_error() {
        // No buildTypes category at all
        let text = r#"{
            "uiDefault": {},
            "backgroundDefault": {},
            "genesys": {},
            "okta": {},
            "extension": {"settings": {}, "default": {}}
        }"#;
        let result: std::result::Result<TemplateDoc, _> = serde_json::from_str(text);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("templates.json")).unwrap();
        let err = TemplateDoc::load(&path).unwrap_err();
        assert!(matches!(err, Error::TemplatesNotFound { .. }));
    }
}
