use fluenter_overlay::settings::Settings;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let settings = Settings::load(path.to_str().unwrap()).unwrap();

    assert_eq!(settings.listen_addr, "127.0.0.1:7765");
    assert!(!settings.debug_logging);
    assert_eq!(settings.log_dir, "logs");
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();

    let settings = Settings {
        listen_addr: "127.0.0.1:9000".into(),
        debug_logging: true,
        log_dir: "tmp-logs".into(),
    };
    settings.save(path).unwrap();

    let loaded = Settings::load(path).unwrap();
    assert_eq!(loaded.listen_addr, settings.listen_addr);
    assert_eq!(loaded.debug_logging, settings.debug_logging);
    assert_eq!(loaded.log_dir, settings.log_dir);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "debug_logging": true }"#).unwrap();

    let settings = Settings::load(path.to_str().unwrap()).unwrap();

    assert!(settings.debug_logging);
    assert_eq!(settings.listen_addr, "127.0.0.1:7765");
    assert_eq!(settings.log_dir, "logs");
}
