use lectern_error::{HttpError, LecternError, LecternErrorKind, RuntimeError};

#[test]
fn test_runtime_failure_is_not_labelled_http() {
    let err: LecternError = RuntimeError::new("Failed to start async runtime: no reactor").into();

    assert!(matches!(err.kind(), LecternErrorKind::Runtime(_)));
    let shown = err.to_string();
    assert!(shown.contains("Runtime Error: Failed to start async runtime"));
    assert!(!shown.contains("HTTP Error"));
}

#[test]
fn test_http_failure_keeps_http_kind() {
    let err: LecternError = HttpError::new("TLS backend unavailable").into();

    assert!(matches!(err.kind(), LecternErrorKind::Http(_)));
}
