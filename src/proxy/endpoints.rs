//! Upstream endpoint resolution.
//!
//! # Responsibilities
//! - Build the grant-type → upstream endpoint mapping once at startup
//! - Resolve a classified grant type to its pre-built upstream URI
//!
//! # Design Decisions
//! - URIs are parsed and assembled at construction time so resolution is
//!   infallible at request time for the recognized variants
//! - The mapping is immutable for the process lifetime; tests point it at
//!   a mock upstream through configuration, never by mutation

use axum::http::uri::{Authority, PathAndQuery, Scheme, Uri};
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::proxy::error::{ProxyError, ProxyResult};
use crate::proxy::grant::GrantType;

/// A fully resolved upstream target for one grant type.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoint {
    /// Host (and optional port) of the authorization server.
    pub authority: Authority,
    /// Complete request URI: scheme, authority, and path. No query; grant
    /// exchange parameters travel in the body.
    pub uri: Uri,
}

/// Errors building the endpoint map from configuration.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid upstream scheme `{0}`")]
    InvalidScheme(String),
    #[error("invalid upstream host `{0}`")]
    InvalidHost(String),
    #[error("invalid upstream path `{0}`")]
    InvalidPath(String),
}

/// Static mapping from grant type to upstream endpoint.
#[derive(Debug, Clone)]
pub struct EndpointMap {
    token: UpstreamEndpoint,
    refresh: UpstreamEndpoint,
}

impl EndpointMap {
    /// Build the map from the upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, EndpointError> {
        let scheme: Scheme = config
            .scheme
            .parse()
            .map_err(|_| EndpointError::InvalidScheme(config.scheme.clone()))?;
        let authority: Authority = config
            .host
            .parse()
            .map_err(|_| EndpointError::InvalidHost(config.host.clone()))?;

        Ok(Self {
            token: build_endpoint(&scheme, &authority, &config.token_path)?,
            refresh: build_endpoint(&scheme, &authority, &config.refresh_path)?,
        })
    }

    /// Resolve a grant type to its upstream endpoint.
    ///
    /// Total over the two recognized variants. The unrecognized sentinel is
    /// rejected by the classifier before resolution; if one shows up anyway
    /// it fails the same way, so no request can slip through unrouted.
    pub fn resolve(&self, grant: &GrantType) -> ProxyResult<&UpstreamEndpoint> {
        match grant {
            GrantType::AuthorizationCode => Ok(&self.token),
            GrantType::RefreshToken => Ok(&self.refresh),
            GrantType::Unrecognized(found) => Err(ProxyError::UnrecognizedGrantType {
                found: found.clone(),
            }),
        }
    }
}

fn build_endpoint(
    scheme: &Scheme,
    authority: &Authority,
    path: &str,
) -> Result<UpstreamEndpoint, EndpointError> {
    if !path.starts_with('/') {
        return Err(EndpointError::InvalidPath(path.to_string()));
    }
    let path_and_query: PathAndQuery = path
        .parse()
        .map_err(|_| EndpointError::InvalidPath(path.to_string()))?;

    let uri = Uri::builder()
        .scheme(scheme.clone())
        .authority(authority.clone())
        .path_and_query(path_and_query)
        .build()
        .map_err(|_| EndpointError::InvalidPath(path.to_string()))?;

    Ok(UpstreamEndpoint {
        authority: authority.clone(),
        uri,
    })
}
