use serial_test::serial;
use std::fs;
use tempfile::tempdir;
use wsb_kernel::config::{load_config, load_config_with_env};
use wsb_kernel::domain::config::{OutputKind, StatusBarConfig, StatusBarConfigInner};

fn load(path: Option<&std::path::Path>) -> StatusBarConfig {
    load_config::<StatusBarConfigInner>(path).expect("config loads").into()
}

#[test]
#[serial]
fn test_defaults_without_file() {
    let config = load(None);
    assert_eq!(config.features, "date");
    assert_eq!(config.separator, " | ");
    assert!(config.parallel);
    assert_eq!(config.timeout_secs, 5);
}

#[test]
#[serial]
fn test_file_values_override_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("wmstatusbar.toml");
    fs::write(
        &path,
        r#"
features = "loadavg,date"
parallel = false
output = "xsetroot"

[feature.weather]
city = "Barcelona"
"#,
    )
    .expect("write config");

    let config = load(Some(&path));
    assert_eq!(config.features, "loadavg,date");
    assert!(!config.parallel);
    assert_eq!(config.output, OutputKind::Xsetroot);
    assert_eq!(config.feature.weather.city, "Barcelona");
    assert_eq!(config.feature.weather.format, "%t", "untouched nested defaults survive");
}

#[test]
fn test_env_overrides_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("wmstatusbar.toml");
    fs::write(&path, "separator = \" - \"\ninterval_secs = 2\n").expect("write config");

    let vars = [
        ("WMSTATUSBAR__SEPARATOR", " :: "),
        ("WMSTATUSBAR__INTERVAL_SECS", "3"),
        ("WMSTATUSBAR__FEATURE__WEATHER__CITY", "Lisbon"),
        ("UNRELATED", "ignored"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();

    let config: StatusBarConfig =
        load_config_with_env::<StatusBarConfigInner>(Some(&path), Some(vars))
            .expect("loads")
            .into();
    assert_eq!(config.separator, " :: ");
    assert_eq!(config.interval_secs, 3);
    assert_eq!(config.feature.weather.city, "Lisbon");
}

#[test]
#[serial]
fn test_missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    assert!(load_config::<StatusBarConfigInner>(Some(&missing)).is_err());
}
