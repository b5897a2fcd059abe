use crate::security::Protocol;
use crate::security::error::UriError;
use percent_encoding::percent_decode_str;
use url::Url;

/// Splits a possibly-relative URL on its first `?`.
///
/// Returns the part before the `?` and, when present, the raw query after it.
/// General URL parsers handle relative forms unreliably, so this works on the
/// raw string and leaves the query byte-for-byte untouched. Supplied as a
/// public helper to make custom [`HttpsApplication`] implementations easier.
///
/// [`HttpsApplication`]: crate::security::HttpsApplication
pub fn strip_query(raw: &str) -> (&str, Option<&str>) {
    match raw.find('?') {
        Some(at) => (&raw[..at], Some(&raw[at + 1..])),
        None => (raw, None),
    }
}

/// Path plus raw query of an absolute URL, as a site-relative string.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    }
}

/// Expands an application-relative source (`~/...`) to an absolute URL string
/// anchored at the current request's scheme, host, and port.
///
/// Sources that do not carry the `~/` marker are returned unchanged; they are
/// relative to the current path, not the application root. The query string is
/// split off up front and re-appended verbatim.
pub fn expand_app_relative(
    source: &str,
    current: &Url,
    base_path: &str,
) -> Result<String, UriError> {
    let (path, query) = strip_query(source);

    let rest = match app_relative_rest(path) {
        Some(rest) => rest,
        None => return Ok(source.to_string()),
    };

    let mut absolute = current.clone();
    absolute.set_fragment(None);
    absolute.set_query(None);
    absolute.set_path(&join_app_path(base_path, rest));

    Ok(match query {
        // Re-appended by hand; a setter would re-unescape the query.
        Some(query) => format!("{absolute}?{query}"),
        None => absolute.to_string(),
    })
}

/// The portion of `path` after the application-relative marker, if any.
fn app_relative_rest(path: &str) -> Option<&str> {
    if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    }
}

fn join_app_path(base_path: &str, rest: &str) -> String {
    let base = base_path.trim_end_matches('/');
    format!("{base}/{rest}")
}

/// Parses `raw` as an absolute URL, mapping the relative case to `None`.
pub(crate) fn parse_maybe_relative(raw: &str) -> Result<Option<Url>, UriError> {
    match Url::parse(raw) {
        Ok(url) => Ok(Some(url)),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(None),
        Err(source) => Err(UriError::malformed(raw, source)),
    }
}

/// Rebuilds `url` under the scheme implied by `protocol`, without its query.
///
/// The host is kept verbatim. The explicit port survives only when the scheme
/// is unchanged (compared case-insensitively); a scheme change falls back to
/// the new scheme's default port. The path is taken percent-decoded and then
/// re-applied so reserved characters end up encoded exactly once.
pub(crate) fn switch_scheme(url: &Url, protocol: Protocol) -> Result<Url, UriError> {
    let host = url
        .host_str()
        .ok_or_else(|| UriError::missing_host(url.as_str()))?;
    let scheme = protocol.scheme();

    let mut authority = format!("{scheme}://{host}");
    if url.scheme().eq_ignore_ascii_case(scheme) {
        if let Some(port) = url.port() {
            authority.push(':');
            authority.push_str(&port.to_string());
        }
    }

    let mut rebuilt = Url::parse(&authority).map_err(|e| UriError::malformed(&authority, e))?;

    let path = percent_decode_str(url.path())
        .decode_utf8()
        .map_err(|_| UriError::invalid_path_encoding(url.as_str()))?;
    rebuilt.set_path(&path);

    Ok(rebuilt)
}

/// Rebuilds `url` under `protocol`, carrying the query over.
///
/// The query is taken in its already-escaped form and appended by hand as
/// `?<query>`. Builder-style query assignment re-unescapes the value, which
/// corrupts opaque tokens such as a return URL carrying its own escaped query
/// string.
pub(crate) fn with_protocol(url: &Url, protocol: Protocol) -> Result<Url, UriError> {
    let rebuilt = switch_scheme(url, protocol)?;

    match url.query() {
        Some(query) if !query.is_empty() => {
            let absolute = format!("{rebuilt}?{query}");
            Url::parse(&absolute).map_err(|e| UriError::malformed(&absolute, e))
        }
        _ => Ok(rebuilt),
    }
}
