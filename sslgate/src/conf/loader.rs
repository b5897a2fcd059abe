use crate::conf::error::ConfigError;
use crate::conf::settings::MapSettings;
use std::fs;
use std::path::Path;
use toml::Value;

/// Loads a flat TOML settings file into a [`MapSettings`].
///
/// Scalar values (strings, integers, floats, booleans) are coerced to their
/// string form, so `EnableSSL = false` and `EnableSSL = "false"` read the
/// same. Nested tables and arrays are rejected.
pub fn load_settings(path: &Path) -> Result<MapSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let table: toml::Table = toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    let mut settings = MapSettings::new();
    for (key, value) in table {
        let value = match value {
            Value::String(s) => s,
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(dt) => dt.to_string(),
            Value::Array(_) | Value::Table(_) => {
                return Err(ConfigError::unsupported_value(path, key));
            }
        };

        settings.set(key, value);
    }

    Ok(settings)
}
