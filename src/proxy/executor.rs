//! Upstream request execution.
//!
//! # Responsibilities
//! - Send the forwarding request to the authorization server
//! - Capture status, headers, and body of the raw response
//!
//! # Design Decisions
//! - One call per request: no retry, no per-call timeout override beyond
//!   the ambient request deadline the hosting layer enforces
//! - Every transport failure (DNS, connect, timeout) surfaces as
//!   `UpstreamUnreachable` with the cause attached

use axum::body::Body;
use axum::http::Request;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::proxy::error::{ProxyError, ProxyResult};
use crate::proxy::transform::ForwardingRequest;
use crate::proxy::UpstreamResponse;

/// HTTP client for the upstream authorization server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    max_response_size: usize,
}

impl UpstreamClient {
    /// Create a client. Responses larger than `max_response_size` bytes are
    /// treated as a transport failure rather than buffered unbounded.
    pub fn new(max_response_size: usize) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            max_response_size,
        }
    }

    /// Execute the forwarding request and capture the raw upstream response.
    pub async fn execute(&self, forwarding: ForwardingRequest) -> ProxyResult<UpstreamResponse> {
        tracing::debug!(uri = %forwarding.uri, "Sending proxied request upstream");

        let mut builder = Request::builder()
            .method(forwarding.method)
            .uri(forwarding.uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = forwarding.headers;
        }
        let request = builder
            .body(Body::from(forwarding.body))
            .map_err(|e| ProxyError::UpstreamUnreachable {
                source: Box::new(e),
            })?;

        let response =
            self.client
                .request(request)
                .await
                .map_err(|e| ProxyError::UpstreamUnreachable {
                    source: Box::new(e),
                })?;

        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), self.max_response_size)
            .await
            .map_err(|e| ProxyError::UpstreamUnreachable {
                source: Box::new(e),
            })?;

        Ok(UpstreamResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}
