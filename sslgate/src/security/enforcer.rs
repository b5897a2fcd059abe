use crate::conf::{AppSettings, ssl_enabled};
use crate::security::application::HttpsApplication;
use crate::security::error::UriError;
use crate::security::protocol::{Protocol, RedirectMode};
use crate::security::uri::{parse_maybe_relative, path_and_query, switch_scheme, with_protocol};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Decides when a request must switch transport and computes the exact URI to
/// redirect the client to.
///
/// Stateless across calls: every operation works from a snapshot of the
/// application capability and a freshly-read enforcement setting. The
/// `EnableSSL` setting is an opt-out switch: only an explicit `"false"`
/// disables upgrading, and downgrading is never gated.
pub struct SslEnforcer<A> {
    application: A,
    settings: Arc<dyn AppSettings>,
}

impl<A: HttpsApplication> SslEnforcer<A> {
    pub fn new(application: A, settings: Arc<dyn AppSettings>) -> Self {
        Self {
            application,
            settings,
        }
    }

    /// The application capability this enforcer drives.
    pub fn application(&self) -> &A {
        &self.application
    }

    /// Resolves `source` to the absolute URI it should be served at under
    /// `protocol`.
    ///
    /// `source` may be absolute, site-relative, or application-relative
    /// (`~/...`). An `Https` request resolves as `Http` when enforcement is
    /// disabled.
    pub fn absolute_uri(&self, source: &str, protocol: Protocol) -> Result<Url, UriError> {
        let protocol = self.effective_protocol(protocol);

        let source = match parse_maybe_relative(source)? {
            Some(_) => Cow::Borrowed(source),
            None => Cow::Owned(self.application.resolve_app_relative(source)?),
        };

        match parse_maybe_relative(&source)? {
            Some(absolute) => with_protocol(&absolute, protocol),
            None => {
                // Still relative: combine with the current request's host,
                // scheme, and path.
                let current = self.application.current_request_uri()?;
                let base = switch_scheme(&current, protocol)?;

                base.join(&source)
                    .map_err(|e| UriError::malformed(source.as_ref(), e))
            }
        }
    }

    /// Redirects to `source`, resolved according to `mode`.
    pub async fn redirect(&mut self, source: &str, mode: RedirectMode) -> anyhow::Result<()> {
        let target = match mode {
            RedirectMode::Relative => return self.application.redirect(source).await,
            RedirectMode::AbsoluteHttp => self.absolute_uri(source, Protocol::Http)?,
            RedirectMode::AbsoluteHttps => self.absolute_uri(source, Protocol::Https)?,
        };

        debug!(location = %target, mode = ?mode, "redirect resolved");
        self.application.redirect(target.as_str()).await
    }

    /// Upgrades the current request to HTTPS when enforcement is enabled and
    /// the connection is not already encrypted.
    ///
    /// Returns whether a redirect was written.
    pub async fn ensure_https(&mut self) -> anyhow::Result<bool> {
        if ssl_enabled(self.settings.as_ref()) && !self.application.is_secure() {
            return self.switch_to_https().await;
        }

        Ok(false)
    }

    /// Downgrades the current request to plain HTTP whenever the connection
    /// is encrypted. Never gated by the enforcement setting.
    ///
    /// Returns whether a redirect was written.
    pub async fn ensure_http(&mut self) -> anyhow::Result<bool> {
        if self.application.is_secure() {
            return self.switch_to_http().await;
        }

        Ok(false)
    }

    /// Redirects the current path+query to its HTTPS variant. No-op when
    /// enforcement is disabled.
    pub async fn switch_to_https(&mut self) -> anyhow::Result<bool> {
        if !ssl_enabled(self.settings.as_ref()) {
            return Ok(false);
        }

        let source = path_and_query(&self.application.current_request_uri()?);
        self.redirect(&source, RedirectMode::AbsoluteHttps).await?;

        Ok(true)
    }

    /// Redirects the current path+query to its plain-HTTP variant.
    pub async fn switch_to_http(&mut self) -> anyhow::Result<bool> {
        let source = path_and_query(&self.application.current_request_uri()?);
        self.redirect(&source, RedirectMode::AbsoluteHttp).await?;

        Ok(true)
    }

    fn effective_protocol(&self, requested: Protocol) -> Protocol {
        // Https silently resolves as Http when enforcement is off; the
        // opt-out exists for local setups without certificates.
        if requested == Protocol::Https && !ssl_enabled(self.settings.as_ref()) {
            debug!("enforcement disabled, resolving https request as http");
            return Protocol::Http;
        }

        requested
    }
}
