//! HTTP server setup and the hosting adapter.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, timeout,
//!   request ID)
//! - Buffer the inbound body and build the transport-neutral
//!   `InboundRequest`
//! - Invoke the forwarding pipeline
//! - Relay the validated upstream response, or map a failure to a
//!   client-facing status
//!
//! # Design Decisions
//! - Classification failures map to 400, upstream failures to 502; one
//!   deterministic policy for every caller
//! - A successful exchange relays the upstream headers and body verbatim;
//!   only hop-by-hop headers invalidated by buffering are dropped

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::header::{CONNECTION, TRANSFER_ENCODING},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::proxy::endpoints::EndpointError;
use crate::proxy::{
    forward, EndpointMap, InboundRequest, ProxyError, UpstreamClient, UpstreamResponse,
};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<EndpointMap>,
    pub client: UpstreamClient,
    pub max_body_size: usize,
}

/// HTTP server hosting the forwarding pipeline.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails when the upstream endpoints cannot be assembled into URIs;
    /// validated configs never hit this.
    pub fn new(config: ProxyConfig) -> Result<Self, EndpointError> {
        let endpoints = Arc::new(EndpointMap::from_config(&config.upstream)?);
        let client = UpstreamClient::new(config.security.max_body_size);

        let state = AppState {
            endpoints,
            client,
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(exchange_handler))
            .route("/", any(exchange_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hosting-side handler: buffers the body, runs the pipeline, renders the
/// outcome.
async fn exchange_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        "Received token exchange request"
    );

    let (parts, body) = request.into_parts();

    let body_bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = ProxyError::BodyUnavailable(e.to_string());
            tracing::warn!(request_id = %request_id, error = %err, "Failed to buffer inbound body");
            metrics::record_exchange("unknown", StatusCode::BAD_REQUEST.as_u16(), start_time);
            return failure_response(StatusCode::BAD_REQUEST, &err);
        }
    };

    let inbound = InboundRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body: body_bytes,
    };

    match forward(&state.client, &state.endpoints, &inbound).await {
        Ok((grant, upstream)) => {
            tracing::debug!(
                request_id = %request_id,
                grant_type = grant.as_str(),
                "Success. Passing upstream response back"
            );
            metrics::record_exchange(grant.as_str(), upstream.status.as_u16(), start_time);
            relay_response(upstream)
        }
        Err(err) => {
            let status = client_status(&err);
            tracing::warn!(
                request_id = %request_id,
                error = %err,
                status = %status,
                "Token exchange failed"
            );
            metrics::record_exchange(grant_label(&err), status.as_u16(), start_time);
            failure_response(status, &err)
        }
    }
}

/// Map a pipeline failure to the status the original caller sees.
fn client_status(err: &ProxyError) -> StatusCode {
    match err {
        ProxyError::UnrecognizedGrantType { .. } | ProxyError::BodyUnavailable(_) => {
            StatusCode::BAD_REQUEST
        }
        ProxyError::UpstreamUnreachable { .. } | ProxyError::UpstreamNon200 { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn grant_label(err: &ProxyError) -> &'static str {
    match err {
        ProxyError::UnrecognizedGrantType { .. } => "unrecognized",
        _ => "unknown",
    }
}

/// Relay a validated upstream response verbatim.
///
/// `Transfer-Encoding` and `Connection` are dropped: the body was buffered,
/// so chunked framing no longer applies, and connection management belongs
/// to each hop.
fn relay_response(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;

    let headers = response.headers_mut();
    for (name, value) in upstream.headers.iter() {
        if name == TRANSFER_ENCODING || name == CONNECTION {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    response
}

/// Render a pipeline failure as a generic proxy error.
///
/// The body is a diagnostic message, deliberately not shaped like an OAuth2
/// error document; the proxy never mimics upstream semantics for its own
/// failures.
fn failure_response(status: StatusCode, err: &ProxyError) -> Response {
    (status, err.to_string()).into_response()
}
