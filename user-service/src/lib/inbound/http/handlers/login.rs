use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::AuthenticatedUserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Exchange email and password for a token.
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let email = EmailAddress::new(body.email).map_err(|_| ApiError::invalid_credentials())?;

    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => {
                tracing::info!("Login rejected: unknown email");
                ApiError::invalid_credentials()
            }
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &user.password_hash,
            user.id.0,
            user.email.as_str(),
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                ApiError::invalid_credentials()
            }
            other => ApiError::internal(other),
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticatedUserData {
            user: (&user).into(),
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
