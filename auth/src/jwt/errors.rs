use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is malformed: {0}")]
    InvalidFormat(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be positive and in range, got {0} seconds")]
    InvalidLifetime(i64),

    #[error("Signing key rejected: {0}")]
    InvalidKey(String),
}

/// Error type for secret key construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretKeyError {
    #[error("Secret key must not be empty")]
    Empty,
}
