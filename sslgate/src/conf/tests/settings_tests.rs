use crate::conf::{AppSettings, ENABLE_SSL_KEY, MapSettings, ssl_enabled};

fn with_flag(value: &str) -> MapSettings {
    let mut settings = MapSettings::new();
    settings.set(ENABLE_SSL_KEY, value);

    settings
}

#[test]
fn enforcement_is_enabled_by_default() {
    let settings = MapSettings::new();

    assert!(ssl_enabled(&settings));
}

#[test]
fn an_explicit_false_disables_enforcement() {
    for value in ["false", "FALSE", "False", "fAlSe"] {
        assert!(!ssl_enabled(&with_flag(value)), "value: {value}");
    }
}

#[test]
fn other_values_keep_enforcement_enabled() {
    for value in ["true", "0", "no", "off", ""] {
        assert!(ssl_enabled(&with_flag(value)), "value: {value}");
    }
}

#[test]
fn lookup_misses_return_none() {
    let settings = MapSettings::new();

    assert_eq!(settings.get("NoSuchKey"), None);
}

#[test]
fn map_settings_collects_from_pairs() {
    let settings: MapSettings = [("A", "1"), ("B", "2")].into_iter().collect();

    assert_eq!(settings.get("A").as_deref(), Some("1"));
    assert_eq!(settings.get("B").as_deref(), Some("2"));
}
