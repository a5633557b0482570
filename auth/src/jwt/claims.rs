use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity claims carried in a token payload.
///
/// Serialized as `{"user_id":..,"email":..,"expires_at":..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub user_id: i64,

    /// Subject email address
    pub email: String,

    /// Expiration time (Unix timestamp, seconds)
    pub expires_at: i64,
}

impl Claims {
    pub fn new(user_id: i64, email: impl Into<String>, expires_at: i64) -> Self {
        Self {
            user_id,
            email: email.into(),
            expires_at,
        }
    }

    /// Create claims expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    pub fn for_user(
        user_id: i64,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidLifetime(ttl.num_seconds()))?;
        Ok(Self::new(user_id, email, expires_at.timestamp()))
    }

    /// Check if token is expired.
    ///
    /// A token remains valid through the second named by `expires_at`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at < current_timestamp
    }
}
