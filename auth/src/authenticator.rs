use chrono::Duration;
use chrono::Utc;

use crate::bearer::extract_bearer_token;
use crate::bearer::BearerError;
use crate::jwt::Claims;
use crate::jwt::SecretKey;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Authentication coordinator combining password verification and token handling.
///
/// Immutable once built; share it behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("{0}")]
    BearerError(#[from] BearerError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// Uses the default hashing parameters and a 24 hour token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Key for token signing and verification
    pub fn new(secret: SecretKey) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret.clone()),
            token_validator: TokenValidator::new(secret),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Replace the password hasher (e.g. one built from configured cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Set the lifetime of issued tokens.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `token_ttl` is not positive, or expiries would be out of range
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Result<Self, TokenError> {
        if token_ttl <= Duration::zero() || Utc::now().checked_add_signed(token_ttl).is_none() {
            return Err(TokenError::InvalidLifetime(token_ttl.num_seconds()));
        }
        self.token_ttl = token_ttl;
        Ok(self)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed or unsupported
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject to put in the token
    /// * `email` - Email to put in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(user_id, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate a token without password verification.
    ///
    /// Used right after registration, when the credentials were just set.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn generate_token(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.token_issuer.issue(user_id, email, self.token_ttl)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_validator.validate(token)
    }

    /// Authenticate an inbound request by its bearer token.
    ///
    /// # Errors
    /// * `BearerError` - `Authorization` header missing or not `Bearer <token>`
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn authenticate_request<B>(
        &self,
        request: &http::Request<B>,
    ) -> Result<Claims, AuthenticationError> {
        let token = extract_bearer_token(request.headers())?;
        Ok(self.validate_token(token)?)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::password::HashingConfig;

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_config(HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            ..HashingConfig::default()
        })
        .expect("Failed to build hasher");

        Authenticator::new(SecretKey::new(b"test_secret_key_at_least_32_bytes!").unwrap())
            .with_password_hasher(hasher)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        // Hash a password
        let password = "Valid123!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        // Authenticate with correct password
        let result = authenticator
            .authenticate(password, &hash, 7, "a@b.com")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        // Validate the token
        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("Valid123!")
            .expect("Failed to hash password");

        // Try with wrong password
        let result = authenticator.authenticate("Wrong123!", &hash, 7, "a@b.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("Valid123!", "$argon2id$v=19$broken", 7, "a@b.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(PasswordError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_token_ttl() {
        let authenticator = authenticator()
            .with_token_ttl(Duration::minutes(5))
            .unwrap();

        let token = authenticator.generate_token(1, "a@b.com").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        let remaining = claims.expires_at - chrono::Utc::now().timestamp();
        assert!(remaining > 0 && remaining <= 5 * 60);
    }

    #[test]
    fn test_invalid_ttl_rejected_at_construction() {
        assert_eq!(
            authenticator().with_token_ttl(Duration::zero()).unwrap_err(),
            TokenError::InvalidLifetime(0)
        );
        assert_eq!(
            authenticator().with_token_ttl(Duration::hours(-1)).unwrap_err(),
            TokenError::InvalidLifetime(-3600)
        );

        let huge = Duration::days(365 * 1_000_000);
        assert_eq!(
            authenticator().with_token_ttl(huge).unwrap_err(),
            TokenError::InvalidLifetime(huge.num_seconds())
        );
    }

    #[test]
    fn test_authenticate_request() {
        let authenticator = authenticator();
        let token = authenticator.generate_token(7, "a@b.com").unwrap();

        let request = http::Request::builder()
            .header(http::header::AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();

        let claims = authenticator
            .authenticate_request(&request)
            .expect("Request authentication failed");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_authenticate_request_failures() {
        let authenticator = authenticator();
        let token = authenticator.generate_token(7, "a@b.com").unwrap();

        let missing = http::Request::builder().body(()).unwrap();
        assert!(matches!(
            authenticator.authenticate_request(&missing),
            Err(AuthenticationError::BearerError(BearerError::MissingHeader))
        ));

        let wrong_scheme = http::Request::builder()
            .header(http::header::AUTHORIZATION, format!("Token {}", token))
            .body(())
            .unwrap();
        assert!(matches!(
            authenticator.authenticate_request(&wrong_scheme),
            Err(AuthenticationError::BearerError(BearerError::InvalidScheme))
        ));

        let forged = http::Request::builder()
            .header(http::header::AUTHORIZATION, format!("Bearer {}x", token))
            .body(())
            .unwrap();
        assert!(matches!(
            authenticator.authenticate_request(&forged),
            Err(AuthenticationError::TokenError(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_concurrent_use_matches_sequential() {
        let authenticator = authenticator();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8i64)
                .map(|i| {
                    let authenticator = &authenticator;
                    scope.spawn(move || {
                        let password = format!("Valid{}23!", i);
                        let email = format!("user{}@example.com", i);

                        let hash = authenticator.hash_password(&password).unwrap();
                        assert!(authenticator.verify_password(&password, &hash).unwrap());
                        assert!(!authenticator.verify_password("Other123!", &hash).unwrap());

                        let token = authenticator.generate_token(i, &email).unwrap();
                        let claims = authenticator.validate_token(&token).unwrap();
                        (claims.user_id, claims.email)
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let (user_id, email) = handle.join().expect("Worker panicked");
                assert_eq!(user_id, i as i64);
                assert_eq!(email, format!("user{}@example.com", i));
            }
        });
    }
}
