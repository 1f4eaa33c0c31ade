use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;
use crate::user::errors::PhoneError;

/// User aggregate entity.
///
/// Represents a registered account as stored in the user directory.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub phone: Option<PhoneNumber>,
    /// The single live refresh token; `None` when logged out or never logged in.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Identity embedded in issued tokens.
    pub fn subject(&self) -> auth::Subject {
        auth::Subject::new(self.id.0, self.email.as_str())
    }

    /// Whether the record is logically absent.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is kept
/// exactly as given; comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Wrap an address read back from the directory, without re-validating.
    pub fn from_stored(email: String) -> Self {
        EmailAddress(email)
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
///
/// bcrypt only reads the first 72 bytes of its input, so longer passwords are
/// rejected instead of being silently truncated.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_BYTES: usize = 72;

    /// Create a new valid password.
    ///
    /// # Errors
    /// * `Empty` - Password is the empty string
    /// * `TooLong` - Password exceeds 72 bytes
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        if password.len() > Self::MAX_BYTES {
            return Err(PasswordError::TooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }
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

/// Phone number value type
///
/// Accepts digits plus common separators, with at least 5 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 5;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid phone number.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 5 digits
    /// * `TooLong` - Longer than 32 characters
    /// * `InvalidCharacters` - Contains anything besides digits, spaces, `+`, `-`, `(`, `)`
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();

        if phone.len() > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
                actual: phone.len(),
            });
        }

        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidCharacters);
        }

        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
                actual: digits,
            });
        }

        Ok(Self(phone))
    }

    /// Wrap a number read back from the directory, without re-validating.
    ///
    /// Older records may hold numbers that predate the current rules.
    pub fn from_stored(phone: String) -> Self {
        Self(phone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Record handed to the directory on registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub phone: Option<PhoneNumber>,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub phone: Option<PhoneNumber>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Validated plaintext password (will be hashed by service)
    /// * `phone` - Optional validated phone number
    pub fn new(email: EmailAddress, password: Password, phone: Option<PhoneNumber>) -> Self {
        Self {
            email,
            password,
            phone,
        }
    }
}

/// Tokens returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Display label for the client (the account email)
    pub label: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::new("A.User@Example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "A.User@Example.com");
    }

    #[test]
    fn test_email_invalid() {
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new(String::new()).is_err());
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(Password::new(String::new()), Err(PasswordError::Empty));
    }

    #[test]
    fn test_password_too_long() {
        assert_eq!(
            Password::new("x".repeat(73)),
            Err(PasswordError::TooLong { max: 72, actual: 73 })
        );
        assert!(Password::new("x".repeat(72)).is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter2"));
    }

    #[test]
    fn test_phone_valid() {
        let phone = PhoneNumber::new(" +1 (555) 010-9999 ".to_string()).unwrap();
        assert_eq!(phone.as_str(), "+1 (555) 010-9999");
    }

    #[test]
    fn test_stored_values_kept_verbatim() {
        assert!(PhoneNumber::new("123".to_string()).is_err());
        assert_eq!(PhoneNumber::from_stored("123".to_string()).as_str(), "123");
        assert_eq!(
            EmailAddress::from_stored("legacy-user".to_string()).as_str(),
            "legacy-user"
        );
    }

    #[test]
    fn test_phone_invalid() {
        assert_eq!(
            PhoneNumber::new("12-34".to_string()),
            Err(PhoneError::TooShort { min: 5, actual: 4 })
        );
        assert_eq!(
            PhoneNumber::new("555-CALL-NOW".to_string()),
            Err(PhoneError::InvalidCharacters)
        );
        assert!(matches!(
            PhoneNumber::new("1".repeat(33)),
            Err(PhoneError::TooLong { max: 32, actual: 33 })
        ));
    }

    #[test]
    fn test_user_subject() {
        let user = User {
            id: UserId(3),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$2b$04$hash".to_string(),
            phone: None,
            refresh_token: None,
            created_at: Utc::now(),
            deleted_at: None,
        };

        assert_eq!(user.subject(), auth::Subject::new(3, "a@x.com"));
        assert!(!user.is_deleted());
    }
}
