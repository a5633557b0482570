use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::UserError;

/// User aggregate entity.
///
/// Represents a registered user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type (assigned by the store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim();
        email_address::EmailAddress::from_str(email)
            .map(|_| EmailAddress(email.to_string()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the strength policy.
///
/// Never stored; only handed to the hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `PasswordPolicyError` - First strength rule the password fails
    pub fn new(password: String) -> Result<Self, auth::PasswordPolicyError> {
        auth::validate_password(&password)?;
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// User fields known before insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl RegisterUserCommand {
    pub fn new(
        email: EmailAddress,
        password: Password,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
        }
    }
}

/// Command to update the profile of an existing user.
///
/// At least one field must be provided.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
}

impl UpdateProfileCommand {
    /// # Errors
    /// * `EmptyUpdate` - Neither name was provided
    pub fn new(
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
    ) -> Result<Self, UserError> {
        if first_name.is_none() && last_name.is_none() {
            return Err(UserError::EmptyUpdate);
        }
        Ok(Self {
            first_name,
            last_name,
        })
    }
}

/// Command to replace a user's password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    /// Current password, checked against the stored hash
    pub current_password: String,
    pub new_password: Password,
}
