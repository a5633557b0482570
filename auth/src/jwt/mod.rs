pub mod claims;
mod codec;
pub mod errors;
pub mod issuer;
pub mod key;
pub mod validator;

pub use claims::Claims;
pub use errors::SecretKeyError;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use key::SecretKey;
pub use validator::TokenValidator;
