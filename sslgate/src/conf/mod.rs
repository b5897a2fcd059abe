mod error;
mod loader;
mod settings;
#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::load_settings;
pub use settings::{AppSettings, ENABLE_SSL_KEY, MapSettings, ssl_enabled};
