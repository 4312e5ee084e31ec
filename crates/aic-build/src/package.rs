//! Release archive creation.
//!
//! Walks the finalized extension directory and writes a deflate-compressed
//! zip named from the manifest's product name and version.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use aic_build_core::manifest::ManifestInfo;
use aic_build_core::Layout;

/// Create the release archive and return its path.
///
/// Entry paths are relative to the extension directory root, so extracting
/// the archive reproduces the extension tree exactly. An existing archive
/// at the destination is overwritten.
pub fn create_archive(layout: &Layout) -> Result<Utf8PathBuf> {
    let manifest =
        ManifestInfo::read(&layout.manifest_file).context("failed to read extension manifest")?;

    std::fs::create_dir_all(&layout.releases_dir)
        .with_context(|| format!("failed to create {}", layout.releases_dir))?;
    let dest = layout.releases_dir.join(manifest.archive_file_name());

    let file = File::create(&dest).with_context(|| format!("failed to create {dest}"))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut count = 0usize;
    for entry in WalkDir::new(&layout.extension_dir) {
        let entry = entry.context("failed to walk extension directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(layout.extension_dir.as_std_path())
            .unwrap_or(entry.path());
        let name = rel
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/");
        debug!("Archiving {}", name);

        zip.start_file(name.as_str(), options)
            .with_context(|| format!("failed to add {name} to the archive"))?;
        let mut source = File::open(entry.path())
            .with_context(|| format!("failed to open {}", entry.path().display()))?;
        io::copy(&mut source, &mut zip)
            .with_context(|| format!("failed to compress {name}"))?;
        count += 1;
    }

    zip.finish().context("failed to finalize the archive")?;
    info!("Archived {} file(s) into {}", count, dest);
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::io::Read;
    use tempfile::TempDir;

    fn extension_fixture() -> (TempDir, Layout) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let layout = Layout::from_root(&root);

        let ext = &layout.extension_dir;
        std::fs::create_dir_all(ext.join("static/js")).unwrap();
        std::fs::write(
            &layout.manifest_file,
            r#"{"name": "AIC Extension", "version": "2.0.1"}"#,
        )
        .unwrap();
        std::fs::write(ext.join("index.html"), "<html></html>").unwrap();
        std::fs::write(ext.join("static/js/app.js"), "console.log('aic')").unwrap();
        std::fs::write(ext.join("background.bundle.js"), "void 0").unwrap();

        (dir, layout)
    }

    fn archive_entries(path: &Utf8PathBuf) -> BTreeSet<String> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_archive_name_comes_from_manifest() {
        let (_dir, layout) = extension_fixture();
        let dest = create_archive(&layout).unwrap();
        assert_eq!(
            dest,
            layout.releases_dir.join("AIC Extension-2.0.1.zip")
        );
        assert!(dest.exists());
    }

    #[test]
    fn test_archive_round_trips_the_extension_tree() {
        let (_dir, layout) = extension_fixture();
        let dest = create_archive(&layout).unwrap();

        let expected: BTreeSet<String> = [
            "manifest.json",
            "index.html",
            "static/js/app.js",
            "background.bundle.js",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(archive_entries(&dest), expected);

        // entry contents survive compression
        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("static/js/app.js")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "console.log('aic')");
    }

    #[test]
    fn test_existing_archive_is_overwritten() {
        let (_dir, layout) = extension_fixture();
        std::fs::create_dir_all(&layout.releases_dir).unwrap();
        let dest = layout.releases_dir.join("AIC Extension-2.0.1.zip");
        std::fs::write(&dest, "stale bytes, not a zip").unwrap();

        let written = create_archive(&layout).unwrap();
        assert_eq!(written, dest);
        // re-readable as a real archive now
        assert!(archive_entries(&dest).contains("manifest.json"));
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let (_dir, layout) = extension_fixture();
        std::fs::remove_file(&layout.manifest_file).unwrap();
        assert!(create_archive(&layout).is_err());
    }
}
