//! Grant type classification.
//!
//! # Responsibilities
//! - Decode the `application/x-www-form-urlencoded` token request body
//! - Extract the `grant_type` field
//! - Classify it as one of the recognized OAuth2 grant types
//!
//! # Design Decisions
//! - Classification is pure: no side effects beyond a debug log event
//! - Unrecognized values (including absent/empty) fail before any
//!   routing or network activity happens
//! - The raw value is preserved for diagnostics only, never forwarded
//!   anywhere by this module

use crate::proxy::error::{ProxyError, ProxyResult};

/// Form field carrying the OAuth2 grant type.
pub const GRANT_TYPE_FIELD: &str = "grant_type";

/// Grant type for an OAuth2 access token request (RFC 6749 §4.1.3).
pub const AUTHORIZATION_CODE: &str = "authorization_code";

/// Grant type for refreshing an access token (RFC 6749 §6).
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Marker recorded when the request carries no `grant_type` field at all.
const ABSENT: &str = "<absent>";

/// The OAuth2 grant type found in a token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
    /// Any other value found in the request. Kept only so diagnostics can
    /// report what the caller actually sent; never routed.
    Unrecognized(String),
}

impl GrantType {
    /// Parse a raw `grant_type` value. Exact match only.
    pub fn parse(raw: &str) -> Self {
        match raw {
            AUTHORIZATION_CODE => GrantType::AuthorizationCode,
            REFRESH_TOKEN => GrantType::RefreshToken,
            other => GrantType::Unrecognized(other.to_string()),
        }
    }

    /// The wire representation of this grant type.
    pub fn as_str(&self) -> &str {
        match self {
            GrantType::AuthorizationCode => AUTHORIZATION_CODE,
            GrantType::RefreshToken => REFRESH_TOKEN,
            GrantType::Unrecognized(raw) => raw,
        }
    }
}

/// Decoded form body of an inbound token request.
///
/// Parsing is non-destructive: it reads from the buffered body bytes and
/// leaves them intact for forwarding. Field order and duplicates are
/// preserved; lookups return the first occurrence.
#[derive(Debug)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    /// Decode a `application/x-www-form-urlencoded` byte sequence.
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            fields: url::form_urlencoded::parse(bytes).into_owned().collect(),
        }
    }

    /// Get the first value for a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Classify a token request by its `grant_type` field.
///
/// Missing, empty, and unknown values all fail with
/// [`ProxyError::UnrecognizedGrantType`]; the unrecognized sentinel never
/// escapes this function.
pub fn classify(form: &FormBody) -> ProxyResult<GrantType> {
    let raw = form.get(GRANT_TYPE_FIELD);

    tracing::debug!(
        grant_type = raw.unwrap_or(ABSENT),
        "Extracted grant type from token request"
    );

    match raw {
        Some(value) => match GrantType::parse(value) {
            GrantType::Unrecognized(found) => {
                Err(ProxyError::UnrecognizedGrantType { found })
            }
            grant => Ok(grant),
        },
        None => Err(ProxyError::UnrecognizedGrantType {
            found: ABSENT.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_authorization_code() {
        let form = FormBody::parse(b"grant_type=authorization_code&code=ABC123");
        assert_eq!(classify(&form).unwrap(), GrantType::AuthorizationCode);
    }

    #[test]
    fn test_classify_refresh_token() {
        let form = FormBody::parse(b"refresh_token=XYZ&grant_type=refresh_token");
        assert_eq!(classify(&form).unwrap(), GrantType::RefreshToken);
    }

    #[test]
    fn test_classify_unknown_grant_type() {
        let form = FormBody::parse(b"grant_type=client_credentials");
        match classify(&form) {
            Err(ProxyError::UnrecognizedGrantType { found }) => {
                assert_eq!(found, "client_credentials");
            }
            other => panic!("expected UnrecognizedGrantType, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_missing_grant_type() {
        let form = FormBody::parse(b"code=ABC123");
        assert!(matches!(
            classify(&form),
            Err(ProxyError::UnrecognizedGrantType { .. })
        ));
    }

    #[test]
    fn test_classify_empty_grant_type() {
        let form = FormBody::parse(b"grant_type=");
        match classify(&form) {
            Err(ProxyError::UnrecognizedGrantType { found }) => {
                assert_eq!(found, "");
            }
            other => panic!("expected UnrecognizedGrantType, got {:?}", other),
        }
    }

    #[test]
    fn test_form_body_decodes_percent_encoding() {
        let form = FormBody::parse(b"grant_type=authorization%5Fcode");
        assert_eq!(form.get("grant_type"), Some("authorization_code"));
    }

    #[test]
    fn test_form_body_first_occurrence_wins() {
        let form = FormBody::parse(b"grant_type=refresh_token&grant_type=authorization_code");
        assert_eq!(form.get("grant_type"), Some("refresh_token"));
    }
}
