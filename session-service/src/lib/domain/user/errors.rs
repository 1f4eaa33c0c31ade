use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number too short: minimum {min} digits, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Phone number too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Phone number contains invalid characters (only digits, spaces, '+', '-', '(' and ')' allowed)")]
    InvalidCharacters,
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    // Domain-level errors
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Refresh token expired")]
    RefreshExpired,

    #[error("Invalid refresh token")]
    InvalidRefresh,

    #[error("Failed to refresh token")]
    RefreshFailed,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Unknown(format!("Blocking task failed: {}", err))
    }
}
