//! Stale-artifact clearing, build reporting, and artifact collection.

use std::path::Path;

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::{debug, warn};

use aic_build_core::Layout;

use crate::output;
use crate::runner::BuildResult;

/// Path patterns, relative to the extension directory, that previous runs
/// may have left behind. Hashed bundle names never collide between runs,
/// so old ones must be swept out before new artifacts land.
const STALE_PATTERNS: &[&str] = &[
    "static/**/*",
    "*background.bundle*.js",
    "login.html",
    "settings.html",
    "*src.*.js",
    "*src.*.css",
    "*src.*.map",
];

/// Delete generated artifacts from previous runs out of the extension tree.
pub fn clear_stale_artifacts(layout: &Layout) -> Result<()> {
    let mut removed = 0usize;
    for pattern in STALE_PATTERNS {
        let full = format!("{}/{}", layout.extension_dir, pattern);
        let entries =
            glob::glob(&full).with_context(|| format!("invalid clear pattern: {full}"))?;
        for entry in entries {
            let path = entry.context("failed to scan extension directory")?;
            if path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
    }
    debug!(
        "Cleared {} stale artifact(s) from {}",
        removed, layout.extension_dir
    );
    Ok(())
}

/// Print every build result and report whether all of them succeeded.
pub fn report(results: &[BuildResult]) -> bool {
    let mut all_ok = true;
    for result in results {
        if result.succeeded() {
            output::success(&format!("Build {} finished", result.id));
        } else {
            output::error(&format!(
                "Build {} failed with exit code {}",
                result.id, result.code
            ));
            all_ok = false;
        }
        if !result.output.is_empty() {
            println!("{}", result.output);
        }
    }
    all_ok
}

/// Copy every sub-build's output into the extension directory.
///
/// Collection is best-effort: artifacts are placed for whichever builds
/// produced output, and a missing source is a warning rather than a fatal
/// error, so packaging gating stays with the build results alone.
pub fn copy_artifacts(layout: &Layout, support: bool) {
    copy_tree(
        &layout.ui_dir.join("build/static"),
        &layout.extension_dir.join("static"),
    );
    copy_file(&layout.ui_dir.join("build/index.html"), &layout.extension_dir);
    copy_tree(&layout.bg_dir.join("build"), &layout.extension_dir);

    if support {
        copy_tree(&layout.login_dir.join("dist"), &layout.extension_dir);
        copy_tree(&layout.settings_dir.join("dist"), &layout.extension_dir);
    }

    output::info("Build artifacts copied into the extension directory");
}

/// Recursively copy the contents of `src` into `dest`.
fn copy_tree(src: &Utf8Path, dest: &Utf8Path) {
    if !src.is_dir() {
        warn!("Skipping copy, source directory missing: {}", src);
        return;
    }
    if let Err(e) = copy_tree_inner(src.as_std_path(), dest.as_std_path()) {
        warn!("Copy {} -> {} failed: {}", src, dest, e);
    }
}

fn copy_tree_inner(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree_inner(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy a single file into a directory, keeping its name.
fn copy_file(src: &Utf8Path, dest_dir: &Utf8Path) {
    let Some(name) = src.file_name() else {
        warn!("Skipping copy, not a file path: {}", src);
        return;
    };
    if let Err(e) = std::fs::copy(src, dest_dir.join(name)) {
        warn!("Copy {} -> {} failed: {}", src, dest_dir, e);
    }
}
