use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let first_name = self.first_name.map(PersonName::new).transpose()?;
        let last_name = self.last_name.map(PersonName::new).transpose()?;

        UpdateProfileCommand::new(first_name, last_name)
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_profile(&authenticated.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
