use serde_json::json;
use std::time::Duration;
use wsb_domain::config::{DateConfig, OutputKind, StatusBarConfig, WeatherConfig};

#[test]
fn config_defaults_are_sane() {
    let cfg = StatusBarConfig::default();
    assert_eq!(cfg.features, "date");
    assert_eq!(cfg.separator, " | ");
    assert!(cfg.parallel);
    assert_eq!(cfg.timeout(), Duration::from_secs(5));
    assert_eq!(cfg.interval(), Duration::from_secs(1));
    assert_eq!(cfg.output, OutputKind::Stdout);
    assert!(cfg.log.dir.is_none());

    assert_eq!(DateConfig::default().format, "%a %b %-d %H:%M:%S");

    let weather = WeatherConfig::default();
    assert!(weather.city.is_empty());
    assert_eq!(weather.format, "%t");
    assert_eq!(weather.endpoint, "https://wttr.in");
}

#[test]
fn config_deserializes_partial_documents() {
    let raw = json!({
        "features": "keyboard,loadavg,date",
        "parallel": false,
        "output": "xsetroot",
        "feature": {
            "keyboard": { "variant": true },
            "weather": { "city": "Narva" }
        },
        "log": { "level": "debug" }
    });

    let cfg: StatusBarConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.features, "keyboard,loadavg,date");
    assert!(!cfg.parallel);
    assert_eq!(cfg.output, OutputKind::Xsetroot);
    assert_eq!(cfg.separator, " | ", "unspecified fields keep their defaults");
    assert!(cfg.feature.keyboard.variant);
    assert_eq!(cfg.feature.weather.city, "Narva");
    assert_eq!(cfg.feature.weather.format, "%t");
    assert_eq!(cfg.log.level, "debug");
}

#[test]
fn config_rejects_unknown_output() {
    let raw = json!({ "output": "dzen" });
    assert!(serde_json::from_value::<StatusBarConfig>(raw).is_err());
}

#[test]
fn config_clones_share_until_mutated() {
    let base = StatusBarConfig::default();
    let mut tweaked = base.clone();
    tweaked.separator = " :: ".to_owned();

    assert_eq!(base.separator, " | ");
    assert_eq!(tweaked.separator, " :: ");
    assert_eq!(OutputKind::Xsetroot.to_string(), "xsetroot");
}
