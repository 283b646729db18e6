//! Selective extractor: materialize a named subset of archive entries.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::types::errors::{ArchiveError, ArchiveResult};

use super::types::{display_name, ArchiveFormat};

/// Extract exactly the named entries into `target_dir`, preserving their
/// archive-relative structure. Returns the expected destination paths.
///
/// Every expected path is re-checked after extraction; a missing file is
/// logged as a warning rather than failing the call, so callers should
/// re-verify before using a path.
pub fn extract_entries(
    archive_path: &Path,
    members: &[&str],
    target_dir: &Path,
) -> ArchiveResult<Vec<PathBuf>> {
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

    fs::create_dir_all(target_dir).map_err(|e| ArchiveError::DirectoryCreate {
        path: target_dir.to_path_buf(),
        source: e,
    })?;

    match format {
        ArchiveFormat::Zip => extract_zip(archive_path, members, target_dir)?,
        #[cfg(feature = "sevenz-support")]
        ArchiveFormat::SevenZ => extract_sevenz(archive_path, members, target_dir)?,
        #[cfg(feature = "rar-support")]
        ArchiveFormat::Rar => extract_rar(archive_path, members, target_dir)?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ArchiveError::UnsupportedFormat {
                name: display_name(archive_path),
            })
        }
    }

    let expected: Vec<PathBuf> = members.iter().map(|m| target_dir.join(m)).collect();
    for path in &expected {
        if !path.exists() {
            log::warn!("extracted file missing: {}", path.display());
        }
    }
    Ok(expected)
}

/// Entry paths may not climb out of the target directory.
fn is_unsafe_member(member: &str) -> bool {
    Path::new(member)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}

fn prepare_parent(out_path: &Path) -> ArchiveResult<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::DirectoryCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn extract_zip(archive_path: &Path, members: &[&str], target_dir: &Path) -> ArchiveResult<()> {
    let name = display_name(archive_path);
    let file = fs::File::open(archive_path).map_err(|e| ArchiveError::Unexpected {
        name: name.clone(),
        reason: format!("failed to open archive: {e}"),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ArchiveError::Corrupt {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    for member in members {
        if is_unsafe_member(member) {
            log::warn!("skipping unsafe entry path '{member}'");
            continue;
        }
        let mut entry = match archive.by_name(member) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound {
                    name,
                    entry: member.to_string(),
                })
            }
            Err(e) => {
                return Err(ArchiveError::Corrupt {
                    name,
                    reason: e.to_string(),
                })
            }
        };

        let out_path = target_dir.join(member);
        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| ArchiveError::DirectoryCreate {
                path: out_path.clone(),
                source: e,
            })?;
            continue;
        }
        prepare_parent(&out_path)?;
        let mut outfile = fs::File::create(&out_path).map_err(|e| ArchiveError::Unexpected {
            name: name.clone(),
            reason: format!("failed to create '{}': {e}", out_path.display()),
        })?;
        io::copy(&mut entry, &mut outfile).map_err(|e| ArchiveError::Unexpected {
            name: name.clone(),
            reason: format!("failed to write '{}': {e}", out_path.display()),
        })?;
    }
    Ok(())
}

#[cfg(feature = "sevenz-support")]
fn extract_sevenz(archive_path: &Path, members: &[&str], target_dir: &Path) -> ArchiveResult<()> {
    use std::collections::HashSet;

    let name = display_name(archive_path);
    let file = fs::File::open(archive_path).map_err(|e| ArchiveError::Unexpected {
        name: name.clone(),
        reason: format!("failed to open archive: {e}"),
    })?;

    let wanted: HashSet<&str> = members
        .iter()
        .copied()
        .filter(|m| {
            let safe = !is_unsafe_member(m);
            if !safe {
                log::warn!("skipping unsafe entry path '{m}'");
            }
            safe
        })
        .collect();
    let mut seen: HashSet<String> = HashSet::new();

    // No random-access entry API in this crate; filter inside the
    // extraction callback and skip everything not requested.
    sevenz_rust::decompress_with_extract_fn(file, target_dir, |entry, reader, dest| {
        let entry_name = entry.name().replace('\\', "/");
        if wanted.contains(entry_name.as_str()) {
            seen.insert(entry_name);
            sevenz_rust::default_entry_extract_fn(entry, reader, dest)
        } else {
            Ok(true)
        }
    })
    .map_err(|e| ArchiveError::Corrupt {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    for member in &wanted {
        if !seen.contains(*member) {
            return Err(ArchiveError::EntryNotFound {
                name,
                entry: member.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(feature = "rar-support")]
fn extract_rar(archive_path: &Path, members: &[&str], target_dir: &Path) -> ArchiveResult<()> {
    let name = display_name(archive_path);

    // Full extraction into a scoped temp dir, then move the requested
    // subset into place (the rar crate has no selective extraction).
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

    rar::Archive::extract_all(path_str, temp_str, "").map_err(|e| ArchiveError::Corrupt {
        name: name.clone(),
        reason: format!("{e:?}"),
    })?;

    let extracted_count = walkdir::WalkDir::new(temp.path())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count();
    log::debug!("rar '{name}' produced {extracted_count} files in staging");

    for member in members {
        if is_unsafe_member(member) {
            log::warn!("skipping unsafe entry path '{member}'");
            continue;
        }
        let staged = temp.path().join(member);
        if !staged.exists() {
            return Err(ArchiveError::EntryNotFound {
                name,
                entry: member.to_string(),
            });
        }
        let out_path = target_dir.join(member);
        if staged.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| ArchiveError::DirectoryCreate {
                path: out_path.clone(),
                source: e,
            })?;
            continue;
        }
        prepare_parent(&out_path)?;
        fs::copy(&staged, &out_path).map_err(|e| ArchiveError::Unexpected {
            name: name.clone(),
            reason: format!("failed to write '{}': {e}", out_path.display()),
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
