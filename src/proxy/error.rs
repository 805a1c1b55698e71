//! Error taxonomy for the forwarding pipeline.
//!
//! Every variant is terminal for its request: the pipeline performs no
//! retries, no fallback endpoints, and no partial responses. The hosting
//! adapter maps each kind to a client-facing status.

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while forwarding a token exchange request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// `grant_type` was missing or not one of the recognized values.
    /// Carries the raw value found in the request for diagnostics.
    #[error("unrecognized `grant_type` in token request: {found}")]
    UnrecognizedGrantType { found: String },

    /// The inbound request body could not be read or buffered.
    #[error("inbound request body unavailable: {0}")]
    BodyUnavailable(String),

    /// Transport-level failure reaching the upstream authorization server
    /// (DNS, connection refused, TLS, timeout).
    #[error("upstream unreachable: {source}")]
    UpstreamUnreachable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The upstream answered with a status other than 200. The status and
    /// body are carried as evidence for operators, never interpreted.
    #[error("upstream returned status {status}")]
    UpstreamNon200 { status: StatusCode, body: Bytes },
}

/// Result type alias for pipeline operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
