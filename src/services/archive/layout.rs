//! Layout normalizer: wrapping-prefix detection.
//!
//! Many archives wrap all content in one redundant top folder (usually
//! the mod's display name). Detecting and stripping it lets the
//! classifier reason against the true content root.

use std::collections::HashSet;

use super::types::{ArchiveEntry, PAK_EXTENSIONS, PLUGIN_EXTENSION};

/// Names that never count as content when inspecting the top level.
const IGNORED_ITEMS: [&str; 5] = [".ds_store", "__macosx", ".git", ".gitignore", "thumbs.db"];

fn is_ignored(segment: &str) -> bool {
    let lower = segment.to_lowercase();
    IGNORED_ITEMS.contains(&lower.as_str())
}

/// Whether a file name carries an extension the classifier cares about.
fn has_relevant_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    if lower.ends_with(&format!(".{PLUGIN_EXTENSION}")) {
        return true;
    }
    PAK_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Detect a single enclosing directory wrapping all meaningful content.
///
/// Returns `Some("Folder/")` when exactly one non-ignored top-level
/// segment exists and every non-ignored entry lives under it. A relevant
/// file (plugin or pak member) sitting at the archive root disqualifies
/// detection: it proves content is not uniformly wrapped.
pub fn detect_wrapping_prefix(entries: &[ArchiveEntry]) -> Option<String> {
    let mut top_level: HashSet<&str> = HashSet::new();
    let mut relevant_file_at_root = false;

    for entry in entries {
        let trimmed = entry.path.trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('/').collect();
        if is_ignored(parts[0]) {
            continue;
        }
        if parts.len() == 1 {
            if entry.is_dir {
                top_level.insert(parts[0]);
            } else if has_relevant_extension(parts[0]) {
                relevant_file_at_root = true;
            }
        } else {
            top_level.insert(parts[0]);
        }
    }

    if top_level.len() != 1 || relevant_file_at_root {
        return None;
    }
    let folder = top_level.into_iter().next()?;

    let all_inside = entries.iter().all(|entry| {
        let trimmed = entry.path.trim_matches('/');
        if trimmed.is_empty() {
            return true;
        }
        let first = trimmed.split('/').next().unwrap_or("");
        is_ignored(first) || first == folder
    });
    if !all_inside {
        return None;
    }

    log::info!("detected single content folder '{folder}'");
    Some(format!("{folder}/"))
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
