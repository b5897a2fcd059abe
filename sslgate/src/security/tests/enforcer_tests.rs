use crate::security::error::UriError;
use crate::security::tests::test_helpers::{
    StubApplication, disabled_settings, enabled_settings, settings_with,
};
use crate::security::{Protocol, RedirectMode, SslEnforcer};
use pretty_assertions::assert_eq;

fn assert_resolves(
    enforcer: &SslEnforcer<StubApplication>,
    source: &str,
    protocol: Protocol,
    expected: &str,
) {
    // Act
    let resolved = enforcer.absolute_uri(source, protocol).unwrap();

    // Assert
    assert_eq!(resolved.as_str(), expected);
}

//-----------------------------------------------------------------------------
// Absolute sources: scheme switching and port preservation
//-----------------------------------------------------------------------------
#[test]
fn preserves_port_when_scheme_is_unchanged() {
    let app = StubApplication::new("https://example.com:8443/app/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "https://example.com:8443/login",
        Protocol::Https,
        "https://example.com:8443/login",
    );
}

#[test]
fn drops_port_when_scheme_changes() {
    let app = StubApplication::new("https://example.com:8443/app/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "https://example.com:8443/login",
        Protocol::Http,
        "http://example.com/login",
    );
}

#[test]
fn escaped_query_round_trips_byte_for_byte() {
    let app = StubApplication::new("https://example.com/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    // Arrange
    let source = "https://example.com/login?ReturnUrl=%2Fadmin%26x%3D1";

    // Act
    let resolved = enforcer.absolute_uri(source, Protocol::Https).unwrap();

    // Assert
    assert_eq!(resolved.query(), Some("ReturnUrl=%2Fadmin%26x%3D1"));
}

#[test]
fn disabled_enforcement_keeps_the_plain_development_port() {
    let app = StubApplication::new("http://localhost:55000/");
    let enforcer = SslEnforcer::new(app, disabled_settings());

    // Https resolves as Http, so the scheme never changes and the random
    // development port survives.
    assert_resolves(
        &enforcer,
        "http://localhost:55000/login",
        Protocol::Https,
        "http://localhost:55000/login",
    );
}

//-----------------------------------------------------------------------------
// Application-relative sources
//-----------------------------------------------------------------------------
#[test]
fn app_relative_source_keeps_current_port_and_query() {
    let app = StubApplication::new("https://example.com:8443/app/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "~/login?ReturnUrl=%2Fadmin%26x%3D1",
        Protocol::Https,
        "https://example.com:8443/login?ReturnUrl=%2Fadmin%26x%3D1",
    );
}

#[test]
fn app_relative_source_drops_port_when_downgrading() {
    let app = StubApplication::new("https://example.com:8443/app/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "~/login?ReturnUrl=%2Fadmin%26x%3D1",
        Protocol::Http,
        "http://example.com/login?ReturnUrl=%2Fadmin%26x%3D1",
    );
}

#[test]
fn app_relative_source_respects_the_base_path() {
    let app = StubApplication::new("http://site.local/somewhere").with_base_path("/app");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "~/account/login",
        Protocol::Http,
        "http://site.local/app/account/login",
    );
}

//-----------------------------------------------------------------------------
// Site-relative sources
//-----------------------------------------------------------------------------
#[test]
fn relative_source_resolves_against_the_current_request() {
    let app = StubApplication::new("http://site.local/account/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "login?x=1",
        Protocol::Https,
        "https://site.local/account/login?x=1",
    );
}

#[test]
fn rooted_relative_source_replaces_the_current_path() {
    let app = StubApplication::new("http://site.local/account/profile");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    assert_resolves(
        &enforcer,
        "/checkout",
        Protocol::Https,
        "https://site.local/checkout",
    );
}

//-----------------------------------------------------------------------------
// Failure semantics
//-----------------------------------------------------------------------------
#[test]
fn malformed_source_surfaces_an_error() {
    let app = StubApplication::new("http://site.local/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    let err = enforcer
        .absolute_uri("http://[not-a-host/login", Protocol::Https)
        .unwrap_err();

    assert!(matches!(err, UriError::Malformed { .. }));
}

#[test]
fn hostless_absolute_source_cannot_be_rebuilt() {
    let app = StubApplication::new("http://site.local/");
    let enforcer = SslEnforcer::new(app, enabled_settings());

    let err = enforcer
        .absolute_uri("mailto:someone@example.com", Protocol::Https)
        .unwrap_err();

    assert!(matches!(err, UriError::MissingHost { .. }));
}

//-----------------------------------------------------------------------------
// Redirect modes
//-----------------------------------------------------------------------------
#[tokio::test]
async fn relative_redirect_passes_the_source_through() {
    let app = StubApplication::new("http://site.local/account/");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    enforcer
        .redirect("checkout?step=2", RedirectMode::Relative)
        .await
        .unwrap();

    assert_eq!(enforcer.application().redirects, vec!["checkout?step=2"]);
}

#[tokio::test]
async fn absolute_https_redirect_resolves_before_delegating() {
    let app = StubApplication::new("https://shop.example/");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    enforcer
        .redirect("~/cart", RedirectMode::AbsoluteHttps)
        .await
        .unwrap();

    assert_eq!(
        enforcer.application().redirects,
        vec!["https://shop.example/cart"]
    );
}

//-----------------------------------------------------------------------------
// Enforcement entry points
//-----------------------------------------------------------------------------
#[tokio::test]
async fn ensure_https_upgrades_a_plain_connection() {
    let app = StubApplication::new("http://example.com/account?x=1");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    let redirected = enforcer.ensure_https().await.unwrap();

    assert!(redirected);
    assert_eq!(
        enforcer.application().redirects,
        vec!["https://example.com/account?x=1"]
    );
}

#[tokio::test]
async fn ensure_https_never_redirects_when_enforcement_is_disabled() {
    // The flag match is case-insensitive.
    for value in ["false", "FALSE", "False"] {
        let app = StubApplication::new("http://example.com/account");
        let mut enforcer = SslEnforcer::new(app, settings_with("EnableSSL", value));

        let redirected = enforcer.ensure_https().await.unwrap();

        assert!(!redirected);
        assert!(enforcer.application().redirects.is_empty());
    }
}

#[tokio::test]
async fn ensure_https_leaves_a_secure_connection_alone() {
    let app = StubApplication::new("https://example.com/account");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    let redirected = enforcer.ensure_https().await.unwrap();

    assert!(!redirected);
    assert!(enforcer.application().redirects.is_empty());
}

#[tokio::test]
async fn ensure_http_downgrades_even_when_enforcement_is_disabled() {
    let app = StubApplication::new("https://example.com:8443/account");
    let mut enforcer = SslEnforcer::new(app, disabled_settings());

    let redirected = enforcer.ensure_http().await.unwrap();

    // Downgrading is never policy-gated; the scheme changes, so the
    // non-default port is dropped.
    assert!(redirected);
    assert_eq!(
        enforcer.application().redirects,
        vec!["http://example.com/account"]
    );
}

#[tokio::test]
async fn ensure_http_leaves_a_plain_connection_alone() {
    let app = StubApplication::new("http://example.com/account");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    let redirected = enforcer.ensure_http().await.unwrap();

    assert!(!redirected);
    assert!(enforcer.application().redirects.is_empty());
}

//-----------------------------------------------------------------------------
// Explicit switches
//-----------------------------------------------------------------------------
#[tokio::test]
async fn switch_to_https_is_a_noop_when_enforcement_is_disabled() {
    let app = StubApplication::new("http://example.com/account");
    let mut enforcer = SslEnforcer::new(app, disabled_settings());

    let redirected = enforcer.switch_to_https().await.unwrap();

    assert!(!redirected);
    assert!(enforcer.application().redirects.is_empty());
}

#[tokio::test]
async fn switch_to_http_redirects_the_current_path_and_query() {
    let app = StubApplication::new("https://example.com/a/b?c=d");
    let mut enforcer = SslEnforcer::new(app, enabled_settings());

    let redirected = enforcer.switch_to_http().await.unwrap();

    assert!(redirected);
    assert_eq!(
        enforcer.application().redirects,
        vec!["http://example.com/a/b?c=d"]
    );
}
