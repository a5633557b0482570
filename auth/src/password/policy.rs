use super::errors::PasswordPolicyError;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 72;

/// Check a candidate password against the strength rules.
///
/// Length is measured in bytes and must lie in `[8, 72]`. The password must
/// contain an uppercase letter, a lowercase letter, a number, and a punctuation
/// or symbol character. Rules are evaluated in that order.
///
/// # Errors
/// * `PasswordPolicyError` - The first rule the password fails
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    let length = password.len();
    if length < MIN_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_LENGTH,
            actual: length,
        });
    }
    if length > MAX_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_LENGTH,
            actual: length,
        });
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if c.is_numeric() {
            has_digit = true;
        } else if is_symbol(c) {
            has_symbol = true;
        }
    }

    if !has_upper {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !has_lower {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !has_digit {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !has_symbol {
        return Err(PasswordPolicyError::MissingSymbol);
    }

    Ok(())
}

// Punctuation or symbol: anything visible that is not a letter or number.
fn is_symbol(c: char) -> bool {
    c.is_ascii_punctuation() || !(c.is_alphanumeric() || c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert_eq!(validate_password("Valid123!"), Ok(()));
        assert_eq!(validate_password("Ünïcode9€x"), Ok(()));
    }

    #[test]
    fn test_missing_character_classes() {
        assert_eq!(
            validate_password("alllower1!"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            validate_password("ALLUPPER1!"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            validate_password("NoNumber!!"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            validate_password("NoSpecial1"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_whitespace_is_not_a_symbol() {
        assert_eq!(
            validate_password("No Special 1"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            validate_password("Sh0rt!"),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        );

        let longest = format!("Aa1!{}", "x".repeat(MAX_LENGTH - 4));
        assert_eq!(validate_password(&longest), Ok(()));

        let too_long = format!("{}y", longest);
        assert_eq!(
            validate_password(&too_long),
            Err(PasswordPolicyError::TooLong {
                max: 72,
                actual: 73
            })
        );
    }

    #[test]
    fn test_first_failure_reported() {
        // Too short wins over missing classes
        assert!(matches!(
            validate_password("abc"),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        // Uppercase is checked before digits and symbols
        assert_eq!(
            validate_password("lowercaseonly"),
            Err(PasswordPolicyError::MissingUppercase)
        );
    }

    #[test]
    fn test_error_messages_are_readable() {
        assert_eq!(
            PasswordPolicyError::MissingSymbol.to_string(),
            "Password must contain at least one special character"
        );
        assert_eq!(
            PasswordPolicyError::TooShort { min: 8, actual: 3 }.to_string(),
            "Password must be at least 8 characters long"
        );
    }
}
