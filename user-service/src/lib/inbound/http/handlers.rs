use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod change_password;
pub mod get_profile;
pub mod health;
pub mod login;
pub mod register;
pub mod update_profile;

/// Message returned for every failure the caller must not learn details about.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections use the `ApiError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// 500 with a generic message. The cause is logged, never returned.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::invalid_credentials(),
            UserError::InvalidEmail(_)
            | UserError::InvalidName(_)
            | UserError::WeakPassword(_)
            | UserError::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body returned by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUserData {
    pub user: UserData,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;
    use auth::PasswordPolicyError;

    use super::*;
    use crate::user::errors::NameError;

    #[test]
    fn test_user_error_status_mapping() {
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::WeakPassword(PasswordPolicyError::MissingDigit)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::InvalidName(NameError::Empty)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("1".to_string())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_internal_errors_are_not_echoed() {
        let err = ApiError::from(UserError::Password(PasswordError::InvalidFormat(
            "expected 6 fields".to_string(),
        )));
        assert_eq!(
            err,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );

        let err = ApiError::from(UserError::DatabaseError("connection refused".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_weak_password_message_is_readable() {
        let err = ApiError::from(UserError::WeakPassword(PasswordPolicyError::MissingSymbol));
        assert_eq!(
            err,
            ApiError::BadRequest("Password must contain at least one special character".to_string())
        );
    }
}
