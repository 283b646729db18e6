//! Install/uninstall orchestration.
//!
//! Consumes the archive core's candidate lists, extracts the selected
//! unit and copies it into the game tree. Pak content wins over ESP
//! content when both are present in one archive, matching how packaged
//! mods usually ship their loose plugin as a leftover.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::services::archive::{self, PakSet};
use crate::services::registry;
use crate::types::errors::{AppError, AppResult, ArchiveError};

/// How to pick one unit from a candidate list without a UI in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Take the first candidate (archive enumeration order).
    First,
    /// Take the candidate at this zero-based index.
    Index(usize),
}

impl SelectionPolicy {
    fn pick<'a, T>(&self, candidates: &'a [T]) -> AppResult<&'a T> {
        match self {
            Self::First => candidates
                .first()
                .ok_or_else(|| AppError::InvalidSelection("empty candidate list".to_string())),
            Self::Index(i) => candidates.get(*i).ok_or_else(|| {
                AppError::InvalidSelection(format!(
                    "index {} out of range (1-{})",
                    i + 1,
                    candidates.len()
                ))
            }),
        }
    }
}

/// What an installation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledContent {
    /// Registered plugin file name.
    Plugin(String),
    /// File name of the trio's main `.pak`.
    PakSet(String),
}

/// Detect and install the content of one archive.
///
/// Pak trios are checked first, then plugins; an archive with neither
/// yields [`AppError::NoInstallableContent`].
pub fn install_from_archive(
    config: &GameConfig,
    archive_path: &Path,
    policy: SelectionPolicy,
) -> AppResult<InstalledContent> {
    let display = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| archive_path.display().to_string());
    log::info!("processing '{display}'");

    let pak_sets = archive::find_pak_sets(archive_path)?;
    if !pak_sets.is_empty() {
        let selected = policy.pick(&pak_sets)?;
        let name = install_pak_set(config, archive_path, selected)?;
        return Ok(InstalledContent::PakSet(name));
    }

    let plugins = archive::find_plugins(archive_path)?;
    if !plugins.is_empty() {
        let selected = policy.pick(&plugins)?;
        let name = install_plugin(config, archive_path, selected)?;
        return Ok(InstalledContent::Plugin(name));
    }

    Err(AppError::NoInstallableContent(display))
}

/// Install every archive in a batch, continuing past per-archive
/// failures. Returns the outcomes paired with their archive paths.
pub fn install_batch(
    config: &GameConfig,
    archives: &[PathBuf],
    policy: SelectionPolicy,
) -> Vec<(PathBuf, AppResult<InstalledContent>)> {
    archives
        .iter()
        .map(|archive| {
            let result = install_from_archive(config, archive, policy);
            if let Err(e) = &result {
                log::error!("'{}' failed: {e}", archive.display());
            }
            (archive.clone(), result)
        })
        .collect()
}

/// Extract one ESP through a scoped temp dir, copy it into the plugin
/// data directory and register it. The temp dir is cleaned up on every
/// path; a registry failure leaves the copied file in place.
fn install_plugin(
    config: &GameConfig,
    archive_path: &Path,
    esp_in_archive: &str,
) -> AppResult<String> {
    let esp_name = Path::new(esp_in_archive)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            AppError::InvalidSelection(format!("'{esp_in_archive}' has no file name"))
        })?;

    let temp = tempfile::Builder::new().prefix("obmod_esp_").tempdir()?;
    let extracted = archive::extract_entries(archive_path, &[esp_in_archive], temp.path())?;
    let staged = &extracted[0];
    if !staged.exists() {
        return Err(AppError::Archive(ArchiveError::Unexpected {
            name: esp_name,
            reason: "extraction reported success but produced no file".to_string(),
        }));
    }

    let dest_dir = config.esp_data_dir();
    fs::create_dir_all(&dest_dir)?;
    let dest = dest_dir.join(&esp_name);
    if dest.exists() {
        log::warn!("overwriting existing '{}'", dest.display());
    }
    fs::copy(staged, &dest)?;
    log::info!("copied '{esp_name}' to '{}'", dest_dir.display());

    registry::register_plugin(&config.plugins_txt_path(), &esp_name)?;
    Ok(esp_name)
}

/// Stage a pak trio through a temp dir, then place the three files flat
/// in the pak mods directory regardless of how deep they sat in the
/// archive. Verifies all three exist afterwards.
fn install_pak_set(config: &GameConfig, archive_path: &Path, set: &PakSet) -> AppResult<String> {
    let temp = tempfile::Builder::new().prefix("obmod_pak_").tempdir()?;
    let members = set.members();
    archive::extract_entries(archive_path, &members, temp.path())?;

    let pak_dir = config.pak_mods_dir();
    fs::create_dir_all(&pak_dir)?;

    for member in members {
        let staged = temp.path().join(member);
        let file_name = Path::new(member)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::InvalidSelection(format!("'{member}' has no file name")))?;
        let dest = pak_dir.join(&file_name);
        if dest.exists() {
            log::warn!("overwriting existing '{}'", dest.display());
        }
        fs::copy(&staged, &dest)?;
    }

    let missing: Vec<String> = members
        .iter()
        .map(|m| {
            Path::new(m)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| m.to_string())
        })
        .filter(|name| !pak_dir.join(name).exists())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Registry(format!(
            "post-install verification failed, missing: {}",
            missing.join(", ")
        )));
    }

    let name = set.pak_file_name().to_string();
    log::info!("installed pak set '{name}'");
    Ok(name)
}

/// Uninstall an ESP: unregister it, then delete the file. A file that is
/// already gone only warns.
pub fn uninstall_plugin(config: &GameConfig, esp_name: &str) -> AppResult<()> {
    registry::unregister_plugin(&config.plugins_txt_path(), esp_name)?;

    let esp_path = config.esp_data_dir().join(esp_name);
    if !esp_path.exists() {
        log::warn!("plugin file '{esp_name}' was already gone");
        return Ok(());
    }
    fs::remove_file(&esp_path)?;
    log::info!("deleted '{esp_name}'");
    Ok(())
}

/// Uninstall a pak trio by the main `.pak` file name. Missing companions
/// are only noted; a missing main pak is a failure.
pub fn uninstall_pak_set(config: &GameConfig, pak_file_name: &str) -> AppResult<()> {
    let pak_dir = config.pak_mods_dir();
    let main_pak = pak_dir.join(pak_file_name);
    if !main_pak.exists() {
        return Err(AppError::NotInstalled(pak_file_name.to_string()));
    }

    let base = Path::new(pak_file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| pak_file_name.to_string());

    fs::remove_file(&main_pak)?;
    log::info!("deleted '{pak_file_name}'");
    for ext in ["ucas", "utoc"] {
        let companion = pak_dir.join(format!("{base}.{ext}"));
        if companion.exists() {
            fs::remove_file(&companion)?;
            log::info!("deleted '{base}.{ext}'");
        } else {
            log::info!("companion '{base}.{ext}' was not present");
        }
    }
    Ok(())
}

/// Registered plugins excluding the pinned default set.
pub fn installed_custom_plugins(config: &GameConfig) -> AppResult<Vec<String>> {
    let plugins = registry::read_plugins(&config.plugins_txt_path())?;
    Ok(registry::custom_plugins(&plugins))
}

/// `.pak` files currently present in the pak mods directory.
pub fn installed_pak_mods(config: &GameConfig) -> AppResult<Vec<String>> {
    let pak_dir = config.pak_mods_dir();
    if !pak_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut mods = Vec::new();
    for entry in fs::read_dir(&pak_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_pak = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pak"));
        if path.is_file() && is_pak {
            mods.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    mods.sort();
    Ok(mods)
}

#[cfg(test)]
#[path = "tests/install_tests.rs"]
mod tests;
