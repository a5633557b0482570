use std::fmt;
use std::sync::Arc;

use super::errors::SecretKeyError;

/// Recommended minimum key size for HS256.
pub const RECOMMENDED_KEY_LENGTH: usize = 32;

/// HMAC signing key shared by the issuer and the validator.
///
/// Built once at startup and never mutated; clones share the same bytes.
#[derive(Clone)]
pub struct SecretKey(Arc<[u8]>);

impl SecretKey {
    /// Create a key from raw bytes.
    ///
    /// # Errors
    /// * `Empty` - No key material was provided
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, SecretKeyError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(SecretKeyError::Empty);
        }
        Ok(Self(Arc::from(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is shorter than the HS256 recommendation.
    pub fn is_weak(&self) -> bool {
        self.len() < RECOMMENDED_KEY_LENGTH
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
