//! Tests for the configuration system.

use lectern_rate_limit::{LecternConfig, RetryConfig};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_bundled_defaults() {
    let config = LecternConfig::load().unwrap();

    assert!(config.rate_limit.requests_per_minute > 0);
    assert!(config.retry.max_attempts > 0);
    assert!(!config.client.api_key_env.is_empty());
}

#[test]
fn test_defaults_match_documented_constants() {
    let config = LecternConfig::default();

    assert_eq!(config.rate_limit.requests_per_minute, 20);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.rate_limit_cooldown(), Duration::from_secs(20));
    assert_eq!(config.retry.connectivity_backoff(), Duration::from_secs(5));
    assert_eq!(config.client.api_key_env, "OPENAI_API_KEY");
}

#[test]
fn test_from_file_fills_missing_keys_with_defaults() {
    let file = write_config(
        r#"
[rate_limit]
requests_per_minute = 1

[retry]
max_attempts = 5
"#,
    );

    let config = LecternConfig::from_file(file.path()).unwrap();

    assert_eq!(config.rate_limit.requests_per_minute, 1);
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.rate_limit_cooldown_secs, 20);
    assert_eq!(config.client.default_model, "gpt-3.5-turbo");
}

#[test]
fn test_from_file_rejects_zero_rate() {
    let file = write_config("[rate_limit]\nrequests_per_minute = 0\n");
    let err = LecternConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("requests_per_minute"));
}

#[test]
fn test_from_file_rejects_zero_attempts() {
    let file = write_config("[retry]\nmax_attempts = 0\n");
    let err = LecternConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("max_attempts"));
}

#[test]
fn test_from_file_reports_missing_file() {
    assert!(LecternConfig::from_file("/nonexistent/lectern.toml").is_err());
}

#[test]
fn test_attempts_is_non_zero() {
    let retry = RetryConfig {
        max_attempts: 4,
        ..RetryConfig::default()
    };
    assert_eq!(retry.attempts().unwrap().get(), 4);
}
