//! Config materialization: environment files, manifest, release metadata.
//!
//! The materializer validates the selected profile names against the
//! template document first; nothing is written unless all three resolve.
//! Writes happen in a fixed order and any I/O failure stops the run before
//! a single build is launched.

use camino::Utf8Path;
use serde_json::Value;
use tracing::info;

use crate::env::EnvRecord;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::templates::TemplateDoc;
use crate::version;

/// Immutable record of the resolved CLI flags.
///
/// Constructed once at startup; read-only thereafter. Profile names are
/// whitespace-trimmed at construction.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Genesys profile name
    pub genesys: String,
    /// Okta profile name
    pub okta: String,
    /// Extension target profile name
    pub extension: String,
    /// Version override; the `VERSION` file is consulted when absent
    pub version: Option<String>,
    /// Accepted for compatibility; artifact clearing always runs
    pub clean: bool,
    /// Apply the chrome-store overlay to the background config
    pub chrome_store: bool,
    /// Dev overlays, dev build variant, debug/sourcemap flags
    pub dev: bool,
    /// Build and collect the login/settings bundles
    pub support: bool,
    /// Write the version into `package.json` and `lerna.json`
    pub release: bool,
    /// Zip the extension directory after a fully successful build
    pub zip: bool,
    /// Skip config materialization entirely
    pub nowrite: bool,
}

/// Materialize every config artifact for one build run.
///
/// Produces, in order: the UI env file, the background env file, the
/// manifest, the settings env file (support mode), and the release
/// version bumps (release mode).
pub fn materialize(layout: &Layout, args: &BuildArgs) -> Result<()> {
    let templates = TemplateDoc::load(&layout.templates_file)?;
    templates.validate_selection(&args.genesys, &args.okta, &args.extension)?;

    let version = version::resolve(args.version.as_deref(), &layout.version_file)?;

    write_ui_env(layout, args, &templates, &version)?;
    write_bg_env(layout, args, &templates, &version)?;
    write_manifest(layout, args, &templates, &version)?;

    if args.support {
        write_settings_env(layout, &templates)?;
    }

    if args.release {
        bump_package_version(&layout.package_json, &version)?;
        bump_package_version(&layout.lerna_json, &version)?;
    }

    Ok(())
}

/// UI `.env`: defaults overlaid with the dev debug/sourcemap flags and the
/// resolved version.
fn write_ui_env(
    layout: &Layout,
    args: &BuildArgs,
    templates: &TemplateDoc,
    version: &str,
) -> Result<()> {
    let mut env = EnvRecord::from_map(&templates.ui_default);
    env.set("REACT_APP_DEBUGING", args.dev);
    env.set("REACT_APP_VERSION", version);
    env.set("GENERATE_SOURCEMAP", args.dev);

    std::fs::write(&layout.ui_env_file, env.to_dotenv())?;
    info!("UI env file written to {}", layout.ui_env_file);
    Ok(())
}

/// Background env JSON: defaults, both integration profiles, the dev
/// overlay (dev mode), then the build-type overlay, then the version.
fn write_bg_env(
    layout: &Layout,
    args: &BuildArgs,
    templates: &TemplateDoc,
    version: &str,
) -> Result<()> {
    let mut env = EnvRecord::from_map(&templates.background_default);
    env.merge(templates.genesys_profile(&args.genesys)?);
    env.merge(templates.okta_profile(&args.okta)?);
    if args.dev {
        env.merge(&templates.background_dev);
    }
    if args.chrome_store {
        env.merge(&templates.build_types.chrome_store);
    } else {
        env.merge(&templates.build_types.default);
    }
    env.set("VERSION", version);

    let path = layout.bg_env_file(args.dev);
    std::fs::write(&path, env.to_json_pretty()?)?;
    info!("Background env file written to {}", path);
    Ok(())
}

/// Manifest: default manifest with name/version substituted and the
/// options page added in support mode.
fn write_manifest(
    layout: &Layout,
    args: &BuildArgs,
    templates: &TemplateDoc,
    version: &str,
) -> Result<()> {
    let mut manifest = templates.extension.default.clone();
    if args.support {
        manifest.insert(
            "options_page".to_string(),
            Value::String("settings.html".to_string()),
        );
    }
    let target = templates.extension_profile(&args.extension)?;
    manifest.insert("name".to_string(), Value::String(target.name.clone()));
    manifest.insert("version".to_string(), Value::String(version.to_string()));

    std::fs::write(
        &layout.manifest_file,
        serde_json::to_string_pretty(&manifest)?,
    )?;
    info!("Manifest written to {}", layout.manifest_file);
    Ok(())
}

/// Settings `.env` from the dev-default profile (support mode only).
fn write_settings_env(layout: &Layout, templates: &TemplateDoc) -> Result<()> {
    let env = EnvRecord::from_map(&templates.settings_dev_default);
    std::fs::write(&layout.settings_env_file, env.to_dotenv())?;
    info!("Settings env file written to {}", layout.settings_env_file);
    Ok(())
}

/// Read-modify-write of a package metadata file, updating only `version`.
///
/// The edit goes through a `serde_json::Value` document so unknown fields
/// and their order survive the rewrite.
fn bump_package_version(path: &Utf8Path, version: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let mut doc: Value = serde_json::from_str(&content)?;
    match doc.as_object_mut() {
        Some(obj) => {
            obj.insert("version".to_string(), Value::String(version.to_string()));
        }
        None => return Err(Error::missing_field(format!("{path}: top-level object"))),
    }
    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    info!("Version {} written to {}", version, path);
    Ok(())
}
