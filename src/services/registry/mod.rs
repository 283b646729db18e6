//! Load-order registry: the plugins.txt line list.
//!
//! - One plugin name per non-empty line; `#` comment lines are skipped
//!   on read and never re-emitted on write.
//! - Default (shipped) plugins stay pinned at the top in their original
//!   order; only the custom section is ever reordered.

use std::fs;
use std::path::Path;

use crate::config::is_default_plugin;
use crate::types::errors::{AppError, AppResult};

/// Read the registry. A missing file is an empty load order, not an error.
pub fn read_plugins(plugins_path: &Path) -> AppResult<Vec<String>> {
    if !plugins_path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(plugins_path).map_err(|e| {
        AppError::Registry(format!("failed to read '{}': {e}", plugins_path.display()))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Write the registry, one name per line.
pub fn write_plugins(plugins_path: &Path, plugins: &[String]) -> AppResult<()> {
    if let Some(parent) = plugins_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Registry(format!("failed to create '{}': {e}", parent.display()))
        })?;
    }
    let mut content = String::new();
    for plugin in plugins {
        if !plugin.is_empty() {
            content.push_str(plugin);
            content.push('\n');
        }
    }
    fs::write(plugins_path, content).map_err(|e| {
        AppError::Registry(format!("failed to write '{}': {e}", plugins_path.display()))
    })
}

/// Append a plugin to the load order. Idempotent: an existing entry
/// (case-insensitive) is left untouched.
pub fn register_plugin(plugins_path: &Path, esp_name: &str) -> AppResult<()> {
    let mut plugins = read_plugins(plugins_path)?;
    if plugins.iter().any(|p| p.eq_ignore_ascii_case(esp_name)) {
        log::info!("'{esp_name}' already registered");
        return Ok(());
    }
    plugins.push(esp_name.to_string());
    write_plugins(plugins_path, &plugins)?;
    log::info!("registered '{esp_name}'");
    Ok(())
}

/// Remove a plugin from the load order (case-insensitive). Absence is a
/// warning, not a failure.
pub fn unregister_plugin(plugins_path: &Path, esp_name: &str) -> AppResult<()> {
    let plugins = read_plugins(plugins_path)?;
    let remaining: Vec<String> = plugins
        .iter()
        .filter(|p| !p.eq_ignore_ascii_case(esp_name))
        .cloned()
        .collect();
    if remaining.len() == plugins.len() {
        log::warn!("'{esp_name}' was not in the registry");
        return Ok(());
    }
    write_plugins(plugins_path, &remaining)?;
    log::info!("unregistered '{esp_name}'");
    Ok(())
}

/// Registered plugins that are not part of the pinned default set.
pub fn custom_plugins(plugins: &[String]) -> Vec<String> {
    plugins
        .iter()
        .filter(|p| !is_default_plugin(p))
        .cloned()
        .collect()
}

/// Reorder the custom section of the load order.
///
/// `new_order` holds zero-based indices into the current custom section
/// and must be a complete permutation of it. The default section keeps
/// its position and relative order.
pub fn reorder_custom(plugins_path: &Path, new_order: &[usize]) -> AppResult<Vec<String>> {
    let all_plugins = read_plugins(plugins_path)?;

    let mut default_section = Vec::new();
    let mut custom_section = Vec::new();
    for plugin in all_plugins {
        if is_default_plugin(&plugin) {
            default_section.push(plugin);
        } else {
            custom_section.push(plugin);
        }
    }

    if new_order.len() != custom_section.len() {
        return Err(AppError::InvalidSelection(format!(
            "expected {} positions, got {}",
            custom_section.len(),
            new_order.len()
        )));
    }
    if new_order.iter().any(|&i| i >= custom_section.len()) {
        return Err(AppError::InvalidSelection(format!(
            "positions must be between 1 and {}",
            custom_section.len()
        )));
    }
    let mut seen = vec![false; custom_section.len()];
    for &i in new_order {
        if seen[i] {
            return Err(AppError::InvalidSelection(
                "each mod must appear exactly once".to_string(),
            ));
        }
        seen[i] = true;
    }

    let mut final_list = default_section;
    for &i in new_order {
        final_list.push(custom_section[i].clone());
    }
    write_plugins(plugins_path, &final_list)?;
    Ok(final_list)
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
