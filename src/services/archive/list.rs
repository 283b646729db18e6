//! Archive reader: uniform entry listing across container formats.

use std::fs;
use std::path::Path;

use crate::types::errors::{ArchiveError, ArchiveResult};

use super::types::{display_name, ArchiveEntry, ArchiveFormat};

/// List all entries of an archive, fully materialized so callers can make
/// multiple passes. Path separators are normalized to `/`; directory
/// detection uses the format-native flag where one exists.
pub fn list_entries(archive_path: &Path) -> ArchiveResult<Vec<ArchiveEntry>> {
    if !archive_path.exists() {
        return Err(ArchiveError::NotFound {
            path: archive_path.to_path_buf(),
        });
    }

    let format = ArchiveFormat::from_path(archive_path)
        .filter(|f| f.codec_available())
        .ok_or_else(|| ArchiveError::UnsupportedFormat {
            name: display_name(archive_path),
        })?;

    match format {
        ArchiveFormat::Zip => list_zip(archive_path),
        #[cfg(feature = "sevenz-support")]
        ArchiveFormat::SevenZ => list_sevenz(archive_path),
        #[cfg(feature = "rar-support")]
        ArchiveFormat::Rar => list_rar(archive_path),
        #[allow(unreachable_patterns)]
        _ => Err(ArchiveError::UnsupportedFormat {
            name: display_name(archive_path),
        }),
    }
}

fn list_zip(archive_path: &Path) -> ArchiveResult<Vec<ArchiveEntry>> {
    let file = fs::File::open(archive_path).map_err(|e| ArchiveError::Unexpected {
        name: display_name(archive_path),
        reason: format!("failed to open archive: {e}"),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ArchiveError::Corrupt {
        name: display_name(archive_path),
        reason: e.to_string(),
    })?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| ArchiveError::Corrupt {
            name: display_name(archive_path),
            reason: format!("failed to read entry {i}: {e}"),
        })?;
        entries.push(ArchiveEntry::new(
            entry.name().replace('\\', "/"),
            entry.is_dir(),
        ));
    }
    Ok(entries)
}

#[cfg(feature = "sevenz-support")]
fn list_sevenz(archive_path: &Path) -> ArchiveResult<Vec<ArchiveEntry>> {
    let file = fs::File::open(archive_path).map_err(|e| ArchiveError::Unexpected {
        name: display_name(archive_path),
        reason: format!("failed to open archive: {e}"),
    })?;

    let mut entries = Vec::new();
    // Listing trick: walk the archive with a skip-all callback so nothing
    // is written to disk.
    sevenz_rust::decompress_with_extract_fn(file, ".", |entry, _, _| {
        entries.push(ArchiveEntry::new(
            entry.name().replace('\\', "/"),
            entry.is_directory(),
        ));
        Ok(true)
    })
    .map_err(|e| ArchiveError::Corrupt {
        name: display_name(archive_path),
        reason: e.to_string(),
    })?;

    Ok(entries)
}

#[cfg(feature = "rar-support")]
fn list_rar(archive_path: &Path) -> ArchiveResult<Vec<ArchiveEntry>> {
    let name = display_name(archive_path);

    // The rar crate cannot list without extracting; go through a scoped
    // temp dir that is dropped before returning.
    let temp = tempfile::tempdir().map_err(|e| ArchiveError::Unexpected {
        name: name.clone(),
        reason: format!("failed to create temp dir: {e}"),
    })?;

    let path_str = archive_path.to_str().ok_or_else(|| ArchiveError::Unexpected {
        name: name.clone(),
        reason: "archive path contains invalid UTF-8".to_string(),
    })?;
    let temp_str = temp.path().to_str().ok_or_else(|| ArchiveError::Unexpected {
        name: name.clone(),
        reason: "temp path contains invalid UTF-8".to_string(),
    })?;

    let archive =
        rar::Archive::extract_all(path_str, temp_str, "").map_err(|e| ArchiveError::Corrupt {
            name: name.clone(),
            reason: format!("{e:?}"),
        })?;

    let mut entries = Vec::new();
    for entry in &archive.files {
        let path = entry.name.replace('\\', "/");
        // No explicit directory flag in this crate; fall back to the
        // trailing-separator convention, confirmed against the extracted tree.
        let is_dir = path.ends_with('/') || temp.path().join(path.trim_matches('/')).is_dir();
        entries.push(ArchiveEntry::new(path, is_dir));
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
