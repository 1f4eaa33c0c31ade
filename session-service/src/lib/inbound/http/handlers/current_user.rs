use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity carried by the caller's access token.
pub async fn current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<CurrentUserResponseData> {
    ApiSuccess::new(StatusCode::OK, user.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: i64,
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AuthenticatedUser> for CurrentUserResponseData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id.0,
            email: user.email,
            expires_at: user.expires_at,
        }
    }
}
