//! Grant-type forwarding pipeline.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → grant.rs      (classify `grant_type`)
//!     → endpoints.rs  (resolve upstream URI)
//!     → transform.rs  (rewrite host/path, preserve body)
//!     → executor.rs   (single upstream call)
//!     → validate.rs   (200 = pass-through, else failure evidence)
//!     → UpstreamResponse or ProxyError
//! ```
//!
//! # Design Decisions
//! - Every stage is a pure function over `Result`; no stage holds state
//!   across requests and no locking exists anywhere in the pipeline
//! - Every failure is terminal for its request: no retry edge in the graph
//! - The pipeline is transport-neutral; hosting adapters construct
//!   `InboundRequest` and render `ProxyError` however their environment
//!   requires

pub mod endpoints;
pub mod error;
pub mod executor;
pub mod grant;
pub mod transform;
pub mod validate;

pub use endpoints::{EndpointMap, UpstreamEndpoint};
pub use error::{ProxyError, ProxyResult};
pub use executor::UpstreamClient;
pub use grant::{FormBody, GrantType};
pub use transform::ForwardingRequest;

use axum::body::Bytes;
use axum::http::header::HOST;
use axum::http::{HeaderMap, Method, StatusCode, Uri};

/// Transport-neutral view of the inbound token request.
///
/// The body is fully buffered before construction, so form parsing reads a
/// copy and the original bytes stay available for forwarding.
#[derive(Debug)]
pub struct InboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    /// The original caller-facing host: `Host` header first, URI authority
    /// as a fallback for HTTP/2-style requests.
    pub fn host(&self) -> Option<String> {
        self.headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| self.uri.authority().map(|a| a.as_str().to_string()))
    }

    /// Decode the form body non-destructively.
    pub fn form(&self) -> FormBody {
        FormBody::parse(&self.body)
    }
}

/// Raw response captured from the upstream authorization server.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Run one token exchange through the full pipeline.
///
/// Returns the classified grant type alongside the validated response so the
/// hosting adapter can log and label its boundary metrics without re-parsing
/// the form.
pub async fn forward(
    client: &UpstreamClient,
    endpoints: &EndpointMap,
    inbound: &InboundRequest,
) -> ProxyResult<(GrantType, UpstreamResponse)> {
    let grant = grant::classify(&inbound.form())?;
    let endpoint = endpoints.resolve(&grant)?;
    let forwarding = transform::rewrite(inbound, endpoint);
    let response = client.execute(forwarding).await?;
    let validated = validate::validate(response)?;
    Ok((grant, validated))
}
