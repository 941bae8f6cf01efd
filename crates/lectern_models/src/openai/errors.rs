//! Mapping of HTTP and transport failures onto [`RemoteErrorKind`].

use super::dto::ErrorEnvelope;
use lectern_error::RemoteErrorKind;

const QUOTA_CODE: &str = "insufficient_quota";
const RATE_LIMIT_CODE: &str = "rate_limit_exceeded";
const AUTH_CODE: &str = "invalid_api_key";

/// Map a non-success status and its body to a failure kind.
///
/// A 429 carrying the `insufficient_quota` code means the account is out of
/// credit, which waiting does not fix; every other 429 is throttling.
///
/// # Examples
///
/// ```
/// use lectern_error::RemoteErrorKind;
/// use lectern_models::status_error_kind;
///
/// let kind = status_error_kind(429, r#"{"error":{"message":"Slow down","code":null}}"#);
/// assert_eq!(kind, RemoteErrorKind::RateLimited("Slow down".to_string()));
/// ```
pub fn status_error_kind(status: u16, body: &str) -> RemoteErrorKind {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let message = match &envelope {
        Some(envelope) if !envelope.error.message.is_empty() => envelope.error.message.clone(),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("HTTP {}", status),
    };
    let quota = envelope.as_ref().is_some_and(|envelope| {
        envelope.error.code.as_deref() == Some(QUOTA_CODE)
            || envelope.error.kind.as_deref() == Some(QUOTA_CODE)
    });

    match status {
        429 if quota => RemoteErrorKind::QuotaExhausted(message),
        429 => RemoteErrorKind::RateLimited(message),
        401 | 403 => RemoteErrorKind::Authentication(message),
        _ => RemoteErrorKind::Api { status, message },
    }
}

/// Map an error object delivered inside an event stream to a failure kind.
///
/// No status accompanies these, so the kind comes from the envelope's `code`
/// and `type` fields alone.
pub(crate) fn stream_error_kind(envelope: &ErrorEnvelope) -> RemoteErrorKind {
    let error = &envelope.error;
    let has = |value: &str| {
        error.code.as_deref() == Some(value) || error.kind.as_deref() == Some(value)
    };
    let message = match (error.message.is_empty(), error.kind.as_deref()) {
        (false, _) => error.message.clone(),
        (true, Some(kind)) => kind.to_string(),
        (true, None) => "error event in stream".to_string(),
    };

    if has(QUOTA_CODE) {
        RemoteErrorKind::QuotaExhausted(message)
    } else if has(RATE_LIMIT_CODE) {
        RemoteErrorKind::RateLimited(message)
    } else if has(AUTH_CODE) || has("authentication_error") {
        RemoteErrorKind::Authentication(message)
    } else {
        match error.kind.as_deref() {
            Some(kind) if kind != message => {
                RemoteErrorKind::Unrecognized(format!("{}: {}", kind, message))
            }
            _ => RemoteErrorKind::Unrecognized(message),
        }
    }
}

/// Map a reqwest failure to a failure kind.
pub fn transport_error_kind(error: &reqwest::Error) -> RemoteErrorKind {
    if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
        RemoteErrorKind::Connection(error.to_string())
    } else if error.is_decode() {
        RemoteErrorKind::MalformedResponse(error.to_string())
    } else if let Some(status) = error.status() {
        RemoteErrorKind::Api {
            status: status.as_u16(),
            message: error.to_string(),
        }
    } else {
        RemoteErrorKind::Unrecognized(error.to_string())
    }
}
