use super::*;
use tempfile::tempdir;

#[test]
fn write_default_settings_creates_file_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tpledit").join("settings.json");

    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());

    std::fs::write(&path, r#"{"template_name":"Custom"}"#).unwrap();
    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).template_name, "Custom");
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    assert_eq!(
        load_settings_from(&dir.path().join("absent.json")),
        Settings::default()
    );
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn fallback_reason_is_kept_for_later_logging() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let loaded = read_settings_from(&path);
    assert_eq!(loaded.settings, Settings::default());
    let reason = loaded.fallback.unwrap();
    assert!(reason.starts_with("invalid "));
    assert!(reason.contains("settings.json"));

    std::fs::write(&path, r#"{"template_name":"Custom"}"#).unwrap();
    let loaded = read_settings_from(&path);
    assert!(loaded.fallback.is_none());
    assert_eq!(loaded.settings.template_name, "Custom");

    assert!(read_settings_from(&dir.path().join("absent.json"))
        .fallback
        .is_none());
}

#[test]
fn settings_path_ends_with_app_file() {
    if let Some(path) = get_settings_path() {
        assert!(path.ends_with("tpledit/settings.json"));
    }
    if let Some(dir) = get_log_dir() {
        assert!(dir.ends_with("tpledit/logs"));
    }
}
