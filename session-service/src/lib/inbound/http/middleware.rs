use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Paths reachable without a token. Matched exactly against the request path.
pub const PUBLIC_PATHS: [&str; 4] = [
    "/api/user/login",
    "/api/user/signup",
    "/api/user/refresh",
    "/api/user/register",
];

/// Identity placed in request extensions for protected handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<auth::Claims> for AuthenticatedUser {
    fn from(claims: auth::Claims) -> Self {
        Self {
            user_id: UserId(claims.id),
            email: claims.email.clone(),
            expires_at: claims.expires_at(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("No token found")]
    NoTokenFound,

    #[error("Invalid token")]
    InvalidToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Public,
    Authenticated(AuthenticatedUser),
}

/// Decide whether a request may proceed.
///
/// Public paths pass without looking at headers. Every other path needs an
/// `Authorization: Bearer <token>` header carrying a valid, unexpired access
/// token.
///
/// # Errors
/// * `NoTokenFound` - Header missing, not a Bearer scheme, or token empty
/// * `InvalidToken` - Token expired, malformed, signed with another key, or a
///   refresh token
pub fn inspect(
    path: &str,
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<GateDecision, GateRejection> {
    if PUBLIC_PATHS.contains(&path) {
        return Ok(GateDecision::Public);
    }

    let token = bearer_token(headers).ok_or(GateRejection::NoTokenFound)?;

    let claims = authenticator.validate_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        GateRejection::InvalidToken
    })?;

    Ok(GateDecision::Authenticated(claims.into()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();

    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    parts.next()
}

/// Middleware applying [`inspect`] to every request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match inspect(req.uri().path(), req.headers(), &state.authenticator) {
        Ok(GateDecision::Public) => {}
        Ok(GateDecision::Authenticated(user)) => {
            req.extensions_mut().insert(user);
        }
        Err(rejection) => {
            tracing::warn!(
                path = %req.uri().path(),
                reason = %rejection,
                "Request rejected by gate"
            );
            return Err(rejection.into());
        }
    }

    Ok(next.run(req).await)
}
