use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

use crate::constants::{ARCHIVE_EXTENSION, ARCHIVE_TEMP_PREFIX};

pub fn is_zip_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(ARCHIVE_EXTENSION))
            .unwrap_or(false)
}

/// Unpack a ZIP archive into a fresh temporary directory
///
/// The directory is removed when the returned handle is dropped. Entries whose
/// names would escape the directory are rejected by the zip reader.
pub fn extract_zip(archive_path: &Path) -> Result<TempDir> {
    let file = File::open(archive_path)
        .with_context(|| format!("Cannot open archive {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Not a readable ZIP archive: {}", archive_path.display()))?;

    let temp_dir = tempfile::Builder::new().prefix(ARCHIVE_TEMP_PREFIX).tempdir()?;
    archive
        .extract(temp_dir.path())
        .with_context(|| format!("Cannot extract {}", archive_path.display()))?;

    debug!(
        "Extracted {} entries from {} into {}",
        archive.len(),
        archive_path.display(),
        temp_dir.path().display()
    );
    Ok(temp_dir)
}
