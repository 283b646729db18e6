use super::*;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn file(path: &str) -> ArchiveEntry {
    ArchiveEntry::new(path, false)
}

/// Helper: create a minimal valid ZIP.
fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

#[test]
fn test_find_plugins_in_wrapped_zip() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(dir.path(), "mod.zip", &[("ModName/Plugin.esp", b"esp")]);

    let plugins = find_plugins(&zip_path).unwrap();
    assert_eq!(plugins, vec!["ModName/Plugin.esp".to_string()]);
}

#[test]
fn test_plugin_extension_is_case_insensitive() {
    let entries = vec![file("A.ESP"), file("b.Esp"), file("notes.txt")];
    let plugins = collect_plugins(&entries, None);
    assert_eq!(plugins, vec!["A.ESP".to_string(), "b.Esp".to_string()]);
}

#[test]
fn test_plugins_keep_enumeration_order() {
    let entries = vec![file("z.esp"), file("a.esp"), file("m.esp")];
    let plugins = collect_plugins(&entries, None);
    assert_eq!(
        plugins,
        vec!["z.esp".to_string(), "a.esp".to_string(), "m.esp".to_string()]
    );
}

#[test]
fn test_directories_are_never_plugins() {
    let entries = vec![ArchiveEntry::new("weird.esp/", true), file("real.esp")];
    let plugins = collect_plugins(&entries, None);
    assert_eq!(plugins, vec!["real.esp".to_string()]);
}

#[test]
fn test_prefix_filters_outside_entries() {
    let entries = vec![file("ModName/Plugin.esp"), file("Other/Stray.esp")];
    let plugins = collect_plugins(&entries, Some("ModName/"));
    assert_eq!(plugins, vec!["ModName/Plugin.esp".to_string()]);
}

#[test]
fn test_complete_pak_set_is_grouped() {
    let entries = vec![
        file("content.pak"),
        file("content.ucas"),
        file("content.utoc"),
    ];
    let sets = collect_pak_sets(&entries, None);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].pak, "content.pak");
    assert_eq!(sets[0].ucas, "content.ucas");
    assert_eq!(sets[0].utoc, "content.utoc");
}

#[test]
fn test_incomplete_pak_set_is_dropped() {
    let entries = vec![file("content.pak"), file("content.ucas")];
    assert!(collect_pak_sets(&entries, None).is_empty());
}

#[test]
fn test_case_variants_share_one_group() {
    // A duplicate .ucas under a different case must not spawn a second
    // group or a second completed set.
    let entries = vec![
        file("content.pak"),
        file("content.ucas"),
        file("content.utoc"),
        file("Content.UCAS"),
    ];
    let sets = collect_pak_sets(&entries, None);
    assert_eq!(sets.len(), 1);
}

#[test]
fn test_grouping_is_order_independent() {
    let mut entries = vec![
        file("a.pak"),
        file("a.ucas"),
        file("a.utoc"),
        file("b.pak"),
        file("b.ucas"),
        file("b.utoc"),
        file("lonely.pak"),
    ];
    let forward: HashSet<PakSet> = collect_pak_sets(&entries, None).into_iter().collect();
    entries.reverse();
    let backward: HashSet<PakSet> = collect_pak_sets(&entries, None).into_iter().collect();
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 2);
}

#[test]
fn test_pak_sets_respect_directories_in_key() {
    // Same base name in two directories = two distinct trios.
    let entries = vec![
        file("one/mod.pak"),
        file("one/mod.ucas"),
        file("one/mod.utoc"),
        file("two/mod.pak"),
        file("two/mod.ucas"),
        file("two/mod.utoc"),
    ];
    let sets = collect_pak_sets(&entries, None);
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].pak, "one/mod.pak");
    assert_eq!(sets[1].pak, "two/mod.pak");
}

#[test]
fn test_find_pak_sets_errors_propagate() {
    let err = find_pak_sets(Path::new("/nonexistent/mod.zip")).unwrap_err();
    assert!(matches!(
        err,
        crate::types::errors::ArchiveError::NotFound { .. }
    ));
}
