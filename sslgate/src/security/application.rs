use crate::security::error::UriError;
use crate::security::uri::{expand_app_relative, parse_maybe_relative};
use async_trait::async_trait;
use pingora::prelude::Session;
use pingora_http::ResponseHeader;
use url::Url;

/// Capability surface the enforcer needs from the hosting runtime.
///
/// [`SessionApplication`] is the default implementation, bound to a pingora
/// [`Session`]. Implement this trait to drive the enforcer from another host,
/// or from tests.
#[async_trait]
pub trait HttpsApplication: Send {
    /// Absolute URI of the request currently being served.
    fn current_request_uri(&self) -> Result<Url, UriError>;

    /// Whether the current connection is encrypted.
    fn is_secure(&self) -> bool;

    /// Performs the redirect side effect through the host.
    ///
    /// `location` may be relative; it is written as received. Host I/O
    /// failures propagate unchanged.
    async fn redirect(&mut self, location: &str) -> anyhow::Result<()>;

    /// Resolves a possibly application-relative source against the current
    /// request. Absolute sources come back unchanged.
    fn resolve_app_relative(&self, source: &str) -> Result<String, UriError>;
}

/// Default [`HttpsApplication`] bound to a downstream pingora [`Session`].
pub struct SessionApplication<'a> {
    session: &'a mut Session,
    base_path: String,
    response_code: u16,
}

impl<'a> SessionApplication<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            base_path: "/".to_string(),
            response_code: 302,
        }
    }

    /// Application root used when expanding `~/` sources. Defaults to `/`.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Status code written on redirect. Defaults to 302.
    pub fn with_response_code(mut self, response_code: u16) -> Self {
        self.response_code = response_code;
        self
    }

    /// Authority of the current request: the request target when it is in
    /// absolute form, the Host header otherwise.
    fn authority(&self) -> Option<String> {
        let head = self.session.req_header();

        head.uri
            .authority()
            .map(|authority| authority.as_str().to_string())
            .or_else(|| {
                head.headers
                    .get(http::header::HOST)
                    .and_then(|host| host.to_str().ok())
                    .map(|host| host.to_string())
            })
    }
}

#[async_trait]
impl HttpsApplication for SessionApplication<'_> {
    fn current_request_uri(&self) -> Result<Url, UriError> {
        let head = self.session.req_header();

        let scheme = if self.is_secure() { "https" } else { "http" };
        let authority = self
            .authority()
            .ok_or_else(|| UriError::missing_host(head.uri.to_string()))?;
        let path_and_query = head
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let raw = format!("{scheme}://{authority}{path_and_query}");
        Url::parse(&raw).map_err(|e| UriError::malformed(&raw, e))
    }

    fn is_secure(&self) -> bool {
        self.session
            .digest()
            .map(|digest| digest.ssl_digest.is_some())
            .unwrap_or(false)
    }

    async fn redirect(&mut self, location: &str) -> anyhow::Result<()> {
        let mut resp = ResponseHeader::build(self.response_code, None)
            .map_err(|e| anyhow::anyhow!("could not build redirect response: {e}"))?;
        resp.insert_header("Location", location)
            .map_err(|e| anyhow::anyhow!("could not set Location header: {e}"))?;

        self.session
            .write_response_header(Box::new(resp), true)
            .await
            .map_err(|e| anyhow::anyhow!("could not write redirect response: {e}"))?;

        Ok(())
    }

    fn resolve_app_relative(&self, source: &str) -> Result<String, UriError> {
        // Absolute URIs are never application-relative.
        if parse_maybe_relative(source)?.is_some() {
            return Ok(source.to_string());
        }

        let current = self.current_request_uri()?;
        expand_app_relative(source, &current, &self.base_path)
    }
}
