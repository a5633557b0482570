use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::codec;
use super::codec::Header;
use super::errors::TokenError;
use super::key::SecretKey;

/// Verifies tokens produced by [`TokenIssuer`](super::TokenIssuer).
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: SecretKey,
}

impl TokenValidator {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Validate a token against the current time.
    ///
    /// # Arguments
    /// * `token` - `header.payload.signature` token string
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `InvalidFormat` - Token does not have exactly three segments
    /// * `InvalidSignature` - Signature does not match the first two segments
    /// * `DecodingFailed` - Header or payload is not base64url JSON
    /// * `UnsupportedAlgorithm` - Header names an algorithm other than HS256
    /// * `TokenExpired` - `expires_at` is in the past
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut segments = token.split(codec::SEPARATOR);
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::InvalidFormat(
                "expected three '.'-separated segments".to_string(),
            ));
        };

        // Signing input is the original text up to the second separator
        let signing_input = &token[..header.len() + 1 + payload.len()];
        codec::verify_signature(&self.key, signing_input, signature)?;

        let header: Header = codec::decode_segment(header, "header")?;
        if header.alg != codec::ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let claims: Claims = codec::decode_segment(payload, "payload")?;
        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}
