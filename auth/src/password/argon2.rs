use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use serde::Deserialize;

use super::encoding::CostParams;
use super::encoding::EncodedHash;
use super::errors::PasswordError;

/// Algorithm tag written into every encoded hash.
pub const ALGORITHM_ID: &str = "argon2id";

/// Argon2 version written into and accepted from encoded hashes.
pub const ARGON2_VERSION: u32 = Version::V0x13 as u32;

/// Cost parameters used when creating new hashes.
///
/// Verification never reads these; stored hashes carry their own parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt_length: usize,
    pub key_length: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 2,
            salt_length: 16,
            key_length: 32,
        }
    }
}

impl HashingConfig {
    fn cost_params(&self) -> CostParams {
        CostParams {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

/// Password hashing implementation.
///
/// Argon2id with a fresh random salt per hash. Hashes are encoded in the
/// self-describing format of [`EncodedHash`].
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    config: HashingConfig,
}

impl PasswordHasher {
    /// Create a new password hasher with the default cost parameters.
    pub fn new() -> Self {
        Self {
            config: HashingConfig::default(),
        }
    }

    /// Create a password hasher with custom cost parameters.
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejects the parameters, or the salt is shorter than 8 bytes
    pub fn with_config(config: HashingConfig) -> Result<Self, PasswordError> {
        if config.salt_length < argon2::MIN_SALT_LEN {
            return Err(PasswordError::InvalidParameters(format!(
                "salt length must be at least {} bytes",
                argon2::MIN_SALT_LEN
            )));
        }
        argon2_for(&config.cost_params(), config.key_length)?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &HashingConfig {
        &self.config
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded hash (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`)
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.config.salt_length];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let params = self.config.cost_params();
        let digest = derive(password, &salt, &params, self.config.key_length)?;

        Ok(EncodedHash {
            algorithm: ALGORITHM_ID.to_string(),
            version: ARGON2_VERSION,
            params,
            salt,
            digest,
        }
        .encode())
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters, salt, and digest length all come from the stored hash, so
    /// hashes created under older cost settings keep verifying.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `encoded` - Stored hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidFormat` - Hash does not have the expected fields
    /// * `DecodingFailed` - Salt or digest is not valid base64
    /// * `UnsupportedAlgorithm` - Hash was produced by another algorithm
    /// * `UnsupportedVersion` - Hash was produced by another Argon2 version
    /// * `InvalidParameters` - Stored parameters are out of Argon2's range
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let stored = EncodedHash::decode(encoded)?;

        if stored.algorithm != ALGORITHM_ID {
            return Err(PasswordError::UnsupportedAlgorithm(stored.algorithm));
        }
        if stored.version != ARGON2_VERSION {
            return Err(PasswordError::UnsupportedVersion(stored.version));
        }

        let computed = derive(password, &stored.salt, &stored.params, stored.digest.len())?;

        Ok(constant_time_eq(&computed, &stored.digest))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn argon2_for(params: &CostParams, key_length: usize) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(key_length),
    )
    .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive(
    password: &str,
    salt: &[u8],
    params: &CostParams,
    key_length: usize,
) -> Result<Vec<u8>, PasswordError> {
    let argon2 = argon2_for(params, key_length)?;

    let mut digest = vec![0u8; key_length];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut digest)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(digest)
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// Runtime depends only on the length of the inputs, never on where they differ.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    std::hint::black_box(diff) == 0
}
