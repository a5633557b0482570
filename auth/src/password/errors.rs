use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format: {0}")]
    InvalidFormat(String),

    #[error("Failed to decode password hash: {0}")]
    DecodingFailed(String),

    #[error("Unsupported password hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported password hash version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid password hash parameters: {0}")]
    InvalidParameters(String),
}

/// Password strength rule violations.
///
/// Only the first unmet rule is reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters long")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one number")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSymbol,
}
