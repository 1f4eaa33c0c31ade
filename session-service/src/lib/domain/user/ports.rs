use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password and optional phone
    ///
    /// # Returns
    /// Identity of the created user
    ///
    /// # Errors
    /// * `AlreadyExists` - A non-deleted user with this email exists
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Authenticate with email and password and open a new session.
    ///
    /// Any refresh token previously stored for the user is replaced.
    ///
    /// # Arguments
    /// * `email` - Email as typed by the user
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Session with fresh access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// End the user's session by clearing the stored refresh token.
    ///
    /// Access tokens already issued stay valid until they expire.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn logout(&self, id: &UserId) -> Result<(), AuthError>;

    /// Exchange the stored refresh token for a new access token.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token returned by login
    ///
    /// # Returns
    /// Session with a new access token and the same refresh token
    ///
    /// # Errors
    /// * `RefreshExpired` - Refresh token has expired
    /// * `RefreshFailed` - Refresh token is malformed or badly signed
    /// * `InvalidRefresh` - User is gone or the token is not the one on record
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Retrieve a non-deleted user by email.
    ///
    /// # Errors
    /// * `NotFound` - No non-deleted user with this email
    /// * `DatabaseError` - Database operation failed
    async fn lookup_by_email(&self, email: &str) -> Result<User, AuthError>;
}

/// Persistence operations for the user directory.
///
/// Every lookup ignores soft-deleted records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - Email, password hash and phone of the new user
    ///
    /// # Returns
    /// Identity assigned by the store
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: NewUser) -> Result<UserId, AuthError>;

    /// Retrieve non-deleted user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve non-deleted user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Store or clear the user's refresh token.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `refresh_token` - New token, or `None` to clear
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), AuthError>;

    /// Check whether a non-deleted user with this email exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError>;
}
