use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Stateless between calls: every operation reads the current record from the
/// repository, computes, and writes back. Password hashing runs on the blocking
/// thread pool.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `authenticator` - Password hasher and token codec
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        if self
            .repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            tracing::warn!(email = %command.email, "Registration rejected: email already registered");
            return Err(AuthError::AlreadyExists(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await?
                .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        let id = self
            .repository
            .insert(NewUser {
                email: command.email,
                password_hash,
                phone: command.phone,
            })
            .await?;

        tracing::info!(user_id = %id, "User registered");

        Ok(id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = match self.lookup_by_email(email).await {
            Ok(user) => user,
            Err(AuthError::NotFound(_)) => {
                tracing::warn!(email = %email, "Login failed: unknown email");
                let authenticator = Arc::clone(&self.authenticator);
                let password = password.to_string();
                let rejection = tokio::task::spawn_blocking(move || {
                    authenticator.reject_unknown_account(&password)
                })
                .await?;
                if let AuthenticationError::PasswordError(e) = rejection {
                    tracing::error!(error = %e, "Failed to build decoy hash");
                }
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let subject = user.subject();
        let pair = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login failed: wrong password");
                AuthError::InvalidCredentials
            }
            other => AuthError::Unknown(format!("Token generation failed: {}", other)),
        })?;

        self.repository
            .update_refresh_token(&user.id, Some(pair.refresh_token.clone()))
            .await?;

        tracing::info!(user_id = %user.id, "Login successful");

        Ok(Session {
            label: user.email.to_string(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }

    async fn logout(&self, id: &UserId) -> Result<(), AuthError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))?;

        self.repository.update_refresh_token(&user.id, None).await?;

        tracing::info!(user_id = %user.id, "Logged out");

        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let claims = self
            .authenticator
            .validate_refresh_token(refresh_token)
            .map_err(|e| match e {
                JwtError::Expired => {
                    tracing::warn!("Refresh rejected: token expired");
                    AuthError::RefreshExpired
                }
                JwtError::Malformed(reason) | JwtError::Encoding(reason) => {
                    tracing::warn!(reason = %reason, "Refresh rejected: token invalid");
                    AuthError::RefreshFailed
                }
                JwtError::WrongKind { actual, .. } => {
                    tracing::warn!(kind = %actual, "Refresh rejected: not a refresh token");
                    AuthError::RefreshFailed
                }
            })?;

        // The stored token is the single source of truth: a newer login or a
        // logout revokes every other refresh token, expired or not.
        let user = match self.repository.find_by_email(&claims.email).await? {
            Some(user) if user.refresh_token.as_deref() == Some(refresh_token) => user,
            Some(user) => {
                tracing::warn!(user_id = %user.id, "Refresh rejected: token not on record");
                return Err(AuthError::InvalidRefresh);
            }
            None => {
                tracing::warn!(user_id = claims.id, "Refresh rejected: user not found");
                return Err(AuthError::InvalidRefresh);
            }
        };

        let access_token = self
            .authenticator
            .issue_access_token(&user.subject())
            .map_err(|e| AuthError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::debug!(user_id = %user.id, "Access token refreshed");

        Ok(Session {
            label: user.email.to_string(),
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    async fn lookup_by_email(&self, email: &str) -> Result<User, AuthError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound(email.to_string()))
    }
}
