use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;
use crate::user::errors::PhoneError;

/// Create an account. Served on both `/register` and `/signup`.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_domain()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref id| ApiSuccess::new(StatusCode::CREATED, id.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Phone(#[from] PhoneError),
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::unprocessable_entity(err.to_string())
    }
}

impl RegisterRequestBody {
    fn try_into_domain(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        // A blank phone field is treated as absent.
        let phone = self
            .phone
            .filter(|phone| !phone.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()?;

        Ok(RegisterCommand::new(email, password, phone))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
}

impl From<&UserId> for RegisterResponseData {
    fn from(id: &UserId) -> Self {
        Self { user_id: id.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(email: &str, password: &str, phone: Option<&str>) -> RegisterRequestBody {
        RegisterRequestBody {
            email: email.to_string(),
            password: password.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_body_converts() {
        let command = body("new@example.com", "hunter22", Some("+1 555 0100"))
            .try_into_domain()
            .unwrap();

        assert_eq!(command.email.as_str(), "new@example.com");
        assert_eq!(command.password.as_str(), "hunter22");
        assert_eq!(command.phone.unwrap().as_str(), "+1 555 0100");
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let command = body("new@example.com", "hunter22", Some("  "))
            .try_into_domain()
            .unwrap();

        assert!(command.phone.is_none());
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert!(matches!(
            body("nope", "hunter22", None).try_into_domain(),
            Err(ParseRegisterRequestError::Email(_))
        ));
        assert!(matches!(
            body("new@example.com", "", None).try_into_domain(),
            Err(ParseRegisterRequestError::Password(_))
        ));
        assert!(matches!(
            body("new@example.com", "hunter22", Some("call me")).try_into_domain(),
            Err(ParseRegisterRequestError::Phone(_))
        ));
    }

    #[test]
    fn test_parse_error_maps_to_422() {
        let err = ApiError::from(ParseRegisterRequestError::Email(EmailError::InvalidFormat(
            "missing @".to_string(),
        )));

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
