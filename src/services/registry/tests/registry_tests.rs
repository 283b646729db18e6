use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn plugins_path(dir: &TempDir) -> PathBuf {
    dir.path().join("plugins.txt")
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    assert!(read_plugins(&plugins_path(&dir)).unwrap().is_empty());
}

#[test]
fn test_comments_and_blanks_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    fs::write(
        &path,
        "# managed by obmod\nOblivion.esm\n\n  \nCoolQuest.esp\n# trailing note\n",
    )
    .unwrap();

    let plugins = read_plugins(&path).unwrap();
    assert_eq!(
        plugins,
        vec!["Oblivion.esm".to_string(), "CoolQuest.esp".to_string()]
    );
}

#[test]
fn test_write_never_emits_comments() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    fs::write(&path, "# old comment\nOblivion.esm\n").unwrap();

    let plugins = read_plugins(&path).unwrap();
    write_plugins(&path, &plugins).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "Oblivion.esm\n");
}

#[test]
fn test_write_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Dev/ObvData/Data/plugins.txt");
    write_plugins(&path, &["A.esp".to_string()]).unwrap();
    assert_eq!(read_plugins(&path).unwrap(), vec!["A.esp".to_string()]);
}

#[test]
fn test_register_is_idempotent_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);

    register_plugin(&path, "CoolQuest.esp").unwrap();
    register_plugin(&path, "COOLQUEST.ESP").unwrap();

    assert_eq!(
        read_plugins(&path).unwrap(),
        vec!["CoolQuest.esp".to_string()]
    );
}

#[test]
fn test_register_appends_at_end() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(&path, &["Oblivion.esm".to_string()]).unwrap();

    register_plugin(&path, "CoolQuest.esp").unwrap();
    assert_eq!(
        read_plugins(&path).unwrap(),
        vec!["Oblivion.esm".to_string(), "CoolQuest.esp".to_string()]
    );
}

#[test]
fn test_unregister_removes_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(
        &path,
        &["Oblivion.esm".to_string(), "CoolQuest.esp".to_string()],
    )
    .unwrap();

    unregister_plugin(&path, "coolquest.ESP").unwrap();
    assert_eq!(
        read_plugins(&path).unwrap(),
        vec!["Oblivion.esm".to_string()]
    );
}

#[test]
fn test_unregister_absent_plugin_is_ok() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(&path, &["Oblivion.esm".to_string()]).unwrap();

    unregister_plugin(&path, "Ghost.esp").unwrap();
    assert_eq!(
        read_plugins(&path).unwrap(),
        vec!["Oblivion.esm".to_string()]
    );
}

#[test]
fn test_custom_plugins_filters_defaults() {
    let plugins = vec![
        "Oblivion.esm".to_string(),
        "Knights.esp".to_string(),
        "CoolQuest.esp".to_string(),
    ];
    assert_eq!(custom_plugins(&plugins), vec!["CoolQuest.esp".to_string()]);
}

#[test]
fn test_reorder_keeps_defaults_pinned() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(
        &path,
        &[
            "Oblivion.esm".to_string(),
            "A.esp".to_string(),
            "Knights.esp".to_string(),
            "B.esp".to_string(),
            "C.esp".to_string(),
        ],
    )
    .unwrap();

    let final_list = reorder_custom(&path, &[2, 0, 1]).unwrap();
    assert_eq!(
        final_list,
        vec![
            "Oblivion.esm".to_string(),
            "Knights.esp".to_string(),
            "C.esp".to_string(),
            "A.esp".to_string(),
            "B.esp".to_string(),
        ]
    );
    assert_eq!(read_plugins(&path).unwrap(), final_list);
}

#[test]
fn test_reorder_rejects_wrong_count() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(&path, &["A.esp".to_string(), "B.esp".to_string()]).unwrap();

    assert!(matches!(
        reorder_custom(&path, &[0]),
        Err(AppError::InvalidSelection(_))
    ));
}

#[test]
fn test_reorder_rejects_duplicates_and_range() {
    let dir = TempDir::new().unwrap();
    let path = plugins_path(&dir);
    write_plugins(&path, &["A.esp".to_string(), "B.esp".to_string()]).unwrap();

    assert!(matches!(
        reorder_custom(&path, &[0, 0]),
        Err(AppError::InvalidSelection(_))
    ));
    assert!(matches!(
        reorder_custom(&path, &[0, 5]),
        Err(AppError::InvalidSelection(_))
    ));
}
