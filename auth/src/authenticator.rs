use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::Subject;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    lifetimes: TokenLifetimes,
    /// Hash checked against when the account does not exist; built on first use.
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Lifetimes of the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived JWT authorizing requests
    pub access_token: String,

    /// Long-lived JWT exchanged for new access tokens
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default lifetimes and hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            lifetimes: TokenLifetimes::default(),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Replace the token lifetimes.
    pub fn with_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    /// Replace the password hasher (e.g. to change the cost factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to embed in both tokens
    ///
    /// # Returns
    /// TokenPair with fresh access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &Subject,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_pair(subject)?)
    }

    /// Issue an access/refresh token pair without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_pair(&self, subject: &Subject) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.jwt_handler.issue(
                subject,
                TokenKind::Access,
                self.lifetimes.access,
            )?,
            refresh_token: self.jwt_handler.issue(
                subject,
                TokenKind::Refresh,
                self.lifetimes.refresh,
            )?,
        })
    }

    /// Issue a new access token only.
    ///
    /// Used by the refresh flow, where the caller already proved possession
    /// of a valid refresh token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, subject: &Subject) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject, TokenKind::Access, self.lifetimes.access)
    }

    /// Spend the same bcrypt work as [`Authenticator::authenticate`] for a
    /// login whose account does not exist, then fail.
    ///
    /// Keeps response time from revealing whether an email is registered.
    ///
    /// # Returns
    /// `InvalidCredentials`, or `PasswordError` if the decoy hash could not
    /// be built
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let decoy_hash = match self.decoy_hash.get() {
            Some(hash) => hash,
            None => match self.password_hasher.hash(DECOY_PASSWORD) {
                Ok(hash) => self.decoy_hash.get_or_init(|| hash),
                Err(e) => return AuthenticationError::PasswordError(e),
            },
        };

        // The outcome is irrelevant; only the work matters.
        let _ = self.password_hasher.verify(password, decoy_hash);

        AuthenticationError::InvalidCredentials
    }

    /// Validate and decode a JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Expired` - Token has expired
    /// * `Malformed` - Token structure or signature is invalid
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Validate a token that must be an access token.
    ///
    /// # Errors
    /// * `Expired` - Token has expired
    /// * `Malformed` - Token structure or signature is invalid
    /// * `WrongKind` - Token is a refresh token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify_kind(token, TokenKind::Access)
    }

    /// Validate a token that must be a refresh token.
    ///
    /// # Errors
    /// * `Expired` - Token has expired
    /// * `Malformed` - Token structure or signature is invalid
    /// * `WrongKind` - Token is an access token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify_kind(token, TokenKind::Refresh)
    }
}
