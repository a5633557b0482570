pub mod argon2;
pub mod encoding;
pub mod errors;
pub mod policy;

pub use self::argon2::HashingConfig;
pub use self::argon2::PasswordHasher;
pub use encoding::CostParams;
pub use encoding::EncodedHash;
pub use errors::PasswordError;
pub use errors::PasswordPolicyError;
pub use policy::validate_password;
