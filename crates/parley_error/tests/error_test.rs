//! Tests for error construction and conversion.

use parley_error::{
    ConfigError, HttpError, JsonError, ParleyError, ParleyErrorKind, ResolveError,
    ResolveErrorKind, RouterError, RouterErrorKind,
};

#[test]
fn test_errors_record_construction_site() {
    let line = line!() + 1;
    let err = HttpError::new("Failed to build image client: invalid TLS backend");

    assert_eq!(err.line, line);
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.to_string().contains("Failed to build image client"));
}

#[test]
fn test_umbrella_keeps_kind() {
    let config: ParleyError = ConfigError::new("fetch.max_image_bytes must be at least 1").into();
    let json: ParleyError = JsonError::new("Failed to parse seed file: EOF").into();

    assert!(matches!(config.kind(), ParleyErrorKind::Config(_)));
    assert!(matches!(json.kind(), ParleyErrorKind::Json(_)));
    assert!(json.to_string().contains("Failed to parse seed file"));
}

#[test]
fn test_fetch_failures_become_resolution_errors() {
    let url = "https://cdn.example.com/cat.png";
    let err: RouterError = ResolveError::new(ResolveErrorKind::TooLarge {
        url: url.to_string(),
        limit: 1024,
    })
    .into();

    match err.kind {
        RouterErrorKind::Resolution(inner) => assert_eq!(inner.url(), url),
        other => panic!("expected resolution error, got {}", other),
    }
}

#[test]
fn test_cancelled_fetch_becomes_cancelled_request() {
    let err: RouterError = ResolveError::new(ResolveErrorKind::Cancelled {
        url: "https://cdn.example.com/cat.png".to_string(),
    })
    .into();

    assert!(matches!(err.kind, RouterErrorKind::Cancelled));
}
