//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (bcrypt, tunable cost)
//! - JWT access/refresh token issuance and validation
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_passwore", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtError, JwtHandler, Subject, TokenKind};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler
//!     .issue(&Subject::new(1, "a@x.com"), TokenKind::Access, Duration::minutes(15))
//!     .unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.email, "a@x.com");
//!
//! let stale = handler
//!     .issue(&Subject::new(1, "a@x.com"), TokenKind::Access, Duration::seconds(-5))
//!     .unwrap();
//! assert_eq!(handler.verify(&stale), Err(JwtError::Expired));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, Subject};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_password_hasher(PasswordHasher::with_cost(4).unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token pair
//! let pair = auth.authenticate("password123", &hash, &Subject::new(1, "a@x.com")).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.id, 1);
//!
//! // A refresh token is not an access token
//! assert!(auth.validate_access_token(&pair.refresh_token).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Subject;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
