use crate::conf::{AppSettings, ENABLE_SSL_KEY, MapSettings};
use crate::security::application::HttpsApplication;
use crate::security::error::UriError;
use crate::security::uri::{expand_app_relative, parse_maybe_relative};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// In-memory [`HttpsApplication`] recording every redirect it is asked to
/// perform.
pub struct StubApplication {
    pub current_uri: Url,
    pub secure: bool,
    pub base_path: String,
    pub redirects: Vec<String>,
}

impl StubApplication {
    pub fn new(current_uri: &str) -> Self {
        let current_uri = Url::parse(current_uri).expect("stub current uri must be absolute");
        let secure = current_uri.scheme() == "https";

        Self {
            current_uri,
            secure,
            base_path: "/".to_string(),
            redirects: Vec::new(),
        }
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }
}

#[async_trait]
impl HttpsApplication for StubApplication {
    fn current_request_uri(&self) -> Result<Url, UriError> {
        Ok(self.current_uri.clone())
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    async fn redirect(&mut self, location: &str) -> anyhow::Result<()> {
        self.redirects.push(location.to_string());
        Ok(())
    }

    fn resolve_app_relative(&self, source: &str) -> Result<String, UriError> {
        if parse_maybe_relative(source)?.is_some() {
            return Ok(source.to_string());
        }

        expand_app_relative(source, &self.current_uri, &self.base_path)
    }
}

pub fn enabled_settings() -> Arc<dyn AppSettings> {
    Arc::new(MapSettings::new())
}

pub fn disabled_settings() -> Arc<dyn AppSettings> {
    settings_with(ENABLE_SSL_KEY, "false")
}

pub fn settings_with(key: &str, value: &str) -> Arc<dyn AppSettings> {
    let mut settings = MapSettings::new();
    settings.set(key, value);

    Arc::new(settings)
}
