//! Authentication utilities library
//!
//! Provides the authentication core used by the user service:
//! - Password hashing (Argon2id, self-describing encoded hashes)
//! - Password strength policy
//! - Compact HS256 token issuing and validation
//! - Bearer token extraction for request authentication
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_config(HashingConfig {
//!     memory_kib: 1024,
//!     iterations: 1,
//!     parallelism: 1,
//!     ..HashingConfig::default()
//! })
//! .unwrap();
//! let hash = hasher.hash("Valid123!").unwrap();
//! assert!(hasher.verify("Valid123!", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SecretKey, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let key = SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(key.clone());
//! let validator = TokenValidator::new(key);
//!
//! let token = issuer.issue(7, "a@b.com", Duration::hours(24)).unwrap();
//! let claims = validator.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 7);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SecretKey};
//!
//! let auth = Authenticator::new(SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("Valid123!").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("Valid123!", &hash, 7, "a@b.com").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.email, "a@b.com");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::SecretKey;
pub use jwt::SecretKeyError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::validate_password;
pub use password::HashingConfig;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicyError;
