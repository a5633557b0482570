use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for changing the password (raw JSON)
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    fn try_into_command(self) -> Result<ChangePasswordCommand, UserError> {
        Ok(ChangePasswordCommand {
            current_password: self.current_password,
            new_password: Password::new(self.new_password)?,
        })
    }
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .change_password(&authenticated.user_id, command)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
