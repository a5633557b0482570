use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::AuthenticatedUserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;

/// Register a user and log them in.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    let user = state
        .user_service
        .register_user(body.try_into_command()?)
        .await?;

    let token = state
        .authenticator
        .generate_token(user.id.0, user.email.as_str())
        .map_err(ApiError::internal)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthenticatedUserData {
            user: (&user).into(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("{0}")]
    Password(#[from] auth::PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let first_name = PersonName::new(self.first_name)?;
        let last_name = PersonName::new(self.last_name)?;
        Ok(RegisterUserCommand::new(email, password, first_name, last_name))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
