use crate::security::application::HttpsApplication;
use crate::security::tests::test_helpers::StubApplication;
use crate::security::{expand_app_relative, strip_query};
use pretty_assertions::assert_eq;
use url::Url;

fn current(uri: &str) -> Url {
    Url::parse(uri).unwrap()
}

//-----------------------------------------------------------------------------
// Manual query splitting
//-----------------------------------------------------------------------------
#[test]
fn splits_nothing_without_a_query() {
    assert_eq!(strip_query("~/account/login"), ("~/account/login", None));
}

#[test]
fn splits_on_the_first_question_mark() {
    assert_eq!(strip_query("a?b?c"), ("a", Some("b?c")));
}

#[test]
fn keeps_an_empty_query() {
    assert_eq!(strip_query("a?"), ("a", Some("")));
}

#[test]
fn keeps_an_empty_path() {
    assert_eq!(strip_query("?x=1"), ("", Some("x=1")));
}

#[test]
fn splitting_leaves_escapes_untouched() {
    let (path, query) = strip_query("~/login?ReturnUrl=%2Fadmin%26x%3D1");

    assert_eq!(path, "~/login");
    assert_eq!(query, Some("ReturnUrl=%2Fadmin%26x%3D1"));
}

//-----------------------------------------------------------------------------
// Application-relative expansion
//-----------------------------------------------------------------------------
#[test]
fn expands_at_the_application_root() {
    let expanded =
        expand_app_relative("~/login", &current("http://host:3000/app/page"), "/").unwrap();

    assert_eq!(expanded, "http://host:3000/login");
}

#[test]
fn expands_under_a_nested_base_path() {
    let expanded = expand_app_relative(
        "~/account/login",
        &current("http://host:3000/app/page"),
        "/app",
    )
    .unwrap();

    assert_eq!(expanded, "http://host:3000/app/account/login");
}

#[test]
fn bare_marker_expands_to_the_root() {
    let expanded = expand_app_relative("~", &current("http://host/somewhere"), "/").unwrap();

    assert_eq!(expanded, "http://host/");
}

#[test]
fn preserves_the_query_verbatim() {
    let expanded = expand_app_relative(
        "~/login?ReturnUrl=%2Fadmin%26x%3D1",
        &current("https://example.com:8443/app/"),
        "/",
    )
    .unwrap();

    assert_eq!(
        expanded,
        "https://example.com:8443/login?ReturnUrl=%2Fadmin%26x%3D1"
    );
}

#[test]
fn does_not_inherit_the_current_request_query() {
    let expanded =
        expand_app_relative("~/login", &current("http://host/page?current=1"), "/").unwrap();

    assert_eq!(expanded, "http://host/login");
}

#[test]
fn path_relative_sources_come_back_unchanged() {
    let expanded = expand_app_relative("login?x=1", &current("http://host/account/"), "/").unwrap();

    assert_eq!(expanded, "login?x=1");
}

//-----------------------------------------------------------------------------
// Capability-level resolution
//-----------------------------------------------------------------------------
#[test]
fn absolute_sources_are_never_application_relative() {
    let app = StubApplication::new("http://site.local/");

    let resolved = app
        .resolve_app_relative("https://other.example/x?y=z")
        .unwrap();

    assert_eq!(resolved, "https://other.example/x?y=z");
}
