use crate::conf::AppSettings;
use crate::security::{SessionApplication, SslEnforcer};
use anyhow::Context;
use async_trait::async_trait;
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GatewayConfig {
    #[serde(default = "default_base_path")]
    base_path: String,

    #[serde(default = "default_response_code")]
    response_code: u16,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_response_code() -> u16 {
    302
}

/// Terminal gateway for plain-HTTP listeners: upgrades every request to its
/// HTTPS variant through the enforcer.
///
/// Requests that do not get redirected (enforcement disabled) receive 404.
/// Never proxies upstream.
pub struct HttpsRedirectGateway {
    settings: Arc<dyn AppSettings>,
    base_path: String,
    response_code: u16,
}

impl HttpsRedirectGateway {
    pub fn new(settings: Arc<dyn AppSettings>) -> Self {
        Self {
            settings,
            base_path: default_base_path(),
            response_code: default_response_code(),
        }
    }

    pub fn from_config(settings: Arc<dyn AppSettings>, raw: &toml::Value) -> anyhow::Result<Self> {
        let cfg: GatewayConfig = raw
            .clone()
            .try_into()
            .context("invalid https_redirect config")?;

        Ok(Self {
            settings,
            base_path: cfg.base_path,
            response_code: cfg.response_code,
        })
    }
}

#[async_trait]
impl ProxyHttp for HttpsRedirectGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        // Never reached: request_filter terminates every request.
        Err(Error::new(Custom(
            "HttpsRedirectGateway attempted to proxy upstream (bug)",
        )))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let redirected = {
            let application = SessionApplication::new(session)
                .with_base_path(self.base_path.clone())
                .with_response_code(self.response_code);
            let mut enforcer = SslEnforcer::new(application, self.settings.clone());

            enforcer.ensure_https().await.map_err(|e| {
                tracing::error!("https redirect failed: {e:#}");
                Error::new(Custom("https redirect failed"))
            })?
        };

        if !redirected {
            session.respond_error(404).await?;
        }

        // This gateway is terminal: it always handles the request.
        Ok(true)
    }
}
