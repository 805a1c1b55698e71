//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sizes > 0)
//! - Check the upstream endpoints actually parse as URI components
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::uri::{Authority, Scheme};

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "upstream.host").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn error(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(error(
            "listener.bind_address",
            "must be a socket address like 0.0.0.0:8080",
        ));
    }

    match config.upstream.scheme.parse::<Scheme>() {
        Ok(scheme) if scheme == Scheme::HTTP || scheme == Scheme::HTTPS => {}
        _ => errors.push(error("upstream.scheme", "must be http or https")),
    }

    if config.upstream.host.parse::<Authority>().is_err() {
        errors.push(error(
            "upstream.host",
            "must be a host with optional port, like auth.example.com:443",
        ));
    }

    for (field, path) in [
        ("upstream.token_path", &config.upstream.token_path),
        ("upstream.refresh_path", &config.upstream.refresh_path),
    ] {
        if !path.starts_with('/') {
            errors.push(error(field, "must be an absolute path"));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(error("timeouts.request_secs", "must be greater than zero"));
    }

    if config.security.max_body_size == 0 {
        errors.push(error("security.max_body_size", "must be greater than zero"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(error(
            "observability.metrics_address",
            "must be a socket address when metrics are enabled",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "nope".into();
        config.upstream.scheme = "gopher".into();
        config.upstream.token_path = "oauth2/token".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ProxyConfig::default();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "timeouts.request_secs");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ProxyConfig::default();
        config.observability.metrics_address = "nope".into();
        config.observability.metrics_enabled = false;
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
