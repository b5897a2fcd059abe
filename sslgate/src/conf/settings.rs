use std::collections::BTreeMap;

/// Setting key gating protocol enforcement.
pub const ENABLE_SSL_KEY: &str = "EnableSSL";

/// String-keyed application settings lookup.
///
/// The enforcer reads through this on every call; implementations decide
/// where values come from (file, environment, embedding application).
pub trait AppSettings: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Whether protocol enforcement is on.
///
/// Enabled by default; only an explicit, case-insensitive `"false"` under
/// [`ENABLE_SSL_KEY`] turns it off. Any other value, or an absent key, keeps
/// enforcement enabled.
pub fn ssl_enabled(settings: &dyn AppSettings) -> bool {
    !matches!(settings.get(ENABLE_SSL_KEY), Some(value) if value.eq_ignore_ascii_case("false"))
}

/// In-memory [`AppSettings`].
#[derive(Debug, Default, Clone)]
pub struct MapSettings {
    entries: BTreeMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl AppSettings for MapSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
