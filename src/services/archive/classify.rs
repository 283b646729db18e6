//! Content classifier: grouping archive entries into installable units.

use std::collections::HashMap;
use std::path::Path;

use crate::types::errors::ArchiveResult;

use super::layout::detect_wrapping_prefix;
use super::list::list_entries;
use super::types::{ArchiveEntry, PakSet, PAK_EXTENSIONS, PLUGIN_EXTENSION};

/// Find ESP plugin candidates in an archive, in enumeration order.
///
/// Paths are returned as stored in the archive (any wrapping prefix left
/// intact) so they can be fed straight to extraction.
pub fn find_plugins(archive_path: &Path) -> ArchiveResult<Vec<String>> {
    let entries = list_entries(archive_path)?;
    let prefix = detect_wrapping_prefix(&entries);
    Ok(collect_plugins(&entries, prefix.as_deref()))
}

/// Find complete pak trios in an archive, in first-seen order.
pub fn find_pak_sets(archive_path: &Path) -> ArchiveResult<Vec<PakSet>> {
    let entries = list_entries(archive_path)?;
    let prefix = detect_wrapping_prefix(&entries);
    Ok(collect_pak_sets(&entries, prefix.as_deref()))
}

fn inside_prefix(entry: &ArchiveEntry, prefix: Option<&str>) -> bool {
    prefix.map_or(true, |p| entry.path.starts_with(p))
}

/// Plugin classification over an already-listed entry set.
pub fn collect_plugins(entries: &[ArchiveEntry], prefix: Option<&str>) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.is_dir && inside_prefix(e, prefix))
        .filter(|e| {
            e.path
                .to_lowercase()
                .ends_with(&format!(".{PLUGIN_EXTENSION}"))
        })
        .map(|e| e.path.clone())
        .collect()
}

#[derive(Default)]
struct PartialSet {
    pak: Option<String>,
    ucas: Option<String>,
    utoc: Option<String>,
}

/// Pak-trio classification over an already-listed entry set.
///
/// Grouping key is the lowercased directory + base name, so case
/// variants of the same base collapse into one group. Groups missing any
/// member are dropped, not reported.
pub fn collect_pak_sets(entries: &[ArchiveEntry], prefix: Option<&str>) -> Vec<PakSet> {
    let mut groups: HashMap<String, PartialSet> = HashMap::new();
    let mut key_order: Vec<String> = Vec::new();

    for entry in entries {
        if entry.is_dir || !inside_prefix(entry, prefix) {
            continue;
        }
        let lower = entry.path.to_lowercase();
        let Some(ext) = PAK_EXTENSIONS
            .iter()
            .find(|ext| lower.ends_with(&format!(".{ext}")))
        else {
            continue;
        };

        // Strip ".<ext>" from the lowered path to get dir + stem.
        let key = lower[..lower.len() - ext.len() - 1].to_string();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            key_order.push(key);
            PartialSet::default()
        });
        match *ext {
            "pak" => group.pak = Some(entry.path.clone()),
            "ucas" => group.ucas = Some(entry.path.clone()),
            "utoc" => group.utoc = Some(entry.path.clone()),
            _ => {}
        }
    }

    let mut sets = Vec::new();
    for key in key_order {
        let Some(group) = groups.get(&key) else {
            continue;
        };
        match (&group.pak, &group.ucas, &group.utoc) {
            (Some(pak), Some(ucas), Some(utoc)) => sets.push(PakSet {
                pak: pak.clone(),
                ucas: ucas.clone(),
                utoc: utoc.clone(),
            }),
            _ => log::info!("ignoring incomplete pak set '{key}'"),
        }
    }
    sets
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
