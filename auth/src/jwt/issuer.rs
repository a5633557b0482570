use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::codec;
use super::codec::Header;
use super::errors::TokenError;
use super::key::SecretKey;

/// Issues compact HS256 tokens.
///
/// Tokens carry no unique identifier; they cannot be individually revoked.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: SecretKey,
}

impl TokenIssuer {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Issue a token for a user, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Subject identifier
    /// * `email` - Subject email
    /// * `ttl` - Token lifetime (must be positive)
    ///
    /// # Returns
    /// `header.payload.signature` token string
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is zero or negative, or the expiry is out of range
    /// * `EncodingFailed` - Header or payload serialization failed
    pub fn issue(&self, user_id: i64, email: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(user_id, email, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime(ttl.num_seconds()));
        }

        let claims = Claims::for_user(user_id, email, issued_at, ttl)?;
        self.sign_claims(&claims)
    }

    /// Serialize and sign arbitrary claims.
    pub fn sign_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = codec::encode_segment(&Header::hs256())?;
        let payload = codec::encode_segment(claims)?;

        let signing_input = format!("{}{}{}", header, codec::SEPARATOR, payload);
        let signature = codec::sign(&self.key, &signing_input)?;

        Ok(format!("{}{}{}", signing_input, codec::SEPARATOR, signature))
    }
}
