use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

const SCHEME: &str = "Bearer";

/// Error type for `Authorization` header extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header")]
    InvalidHeaderValue,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    InvalidScheme,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The value must split on a single space into exactly two parts: the literal
/// scheme `Bearer` and a non-empty token.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header present
/// * `InvalidHeaderValue` - Header value is not visible ASCII
/// * `InvalidScheme` - Header is not of the form `Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidHeaderValue)?;

    parse_bearer(value)
}

/// Parse a raw `Authorization` header value.
pub fn parse_bearer(value: &str) -> Result<&str, BearerError> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::InvalidScheme),
    }
}
