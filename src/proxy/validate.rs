//! Upstream response validation.
//!
//! Status 200 passes through untouched. Anything else becomes
//! `UpstreamNon200` carrying the status and body as evidence; the failure is
//! relayed, never interpreted or retried.

use axum::http::StatusCode;

use crate::proxy::error::{ProxyError, ProxyResult};
use crate::proxy::UpstreamResponse;

/// Classify the captured upstream response.
pub fn validate(response: UpstreamResponse) -> ProxyResult<UpstreamResponse> {
    if response.status == StatusCode::OK {
        return Ok(response);
    }

    tracing::warn!(
        status = %response.status,
        body = %String::from_utf8_lossy(&response.body),
        "Non-200 response from upstream token endpoint"
    );

    Err(ProxyError::UpstreamNon200 {
        status: response.status,
        body: response.body,
    })
}
