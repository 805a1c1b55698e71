//! Request rewriting for upstream forwarding.
//!
//! # Responsibilities
//! - Derive the forwarding request from the inbound request
//! - Rewrite URI, `Host`, and `X-Forwarded-Host` for the resolved endpoint
//! - Preserve method and body bytes exactly
//!
//! # Design Decisions
//! - The inbound request is never mutated; the forwarding request is a
//!   fully owned copy scoped to one exchange
//! - Any inbound query string is dropped: grant exchange parameters travel
//!   in the body, not the query
//! - `Transfer-Encoding` is stripped because the body is forwarded as a
//!   single buffered payload with a known length

use axum::body::Bytes;
use axum::http::header::{HeaderValue, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, Method, Uri};

use crate::proxy::endpoints::UpstreamEndpoint;
use crate::proxy::InboundRequest;

/// Header carrying the original inbound host to the upstream.
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Immutable request derived from the inbound one, rewritten to target the
/// resolved upstream endpoint. Owned by a single exchange.
#[derive(Debug, Clone)]
pub struct ForwardingRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Rewrite the inbound request to target the given upstream endpoint.
pub fn rewrite(inbound: &InboundRequest, endpoint: &UpstreamEndpoint) -> ForwardingRequest {
    let mut headers = inbound.headers.clone();

    if let Some(original_host) = inbound.host() {
        if let Ok(value) = HeaderValue::from_str(&original_host) {
            headers.insert(X_FORWARDED_HOST, value);
        }
    }

    if let Ok(value) = HeaderValue::from_str(endpoint.authority.as_str()) {
        headers.insert(HOST, value);
    }

    headers.remove(TRANSFER_ENCODING);

    ForwardingRequest {
        method: inbound.method.clone(),
        uri: endpoint.uri.clone(),
        headers,
        body: inbound.body.clone(),
    }
}
