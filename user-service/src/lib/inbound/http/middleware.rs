use auth::AuthenticationError;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware that validates bearer tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = state
        .authenticator
        .authenticate_request(&req)
        .map_err(|e| rejection(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.user_id),
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn rejection(err: AuthenticationError) -> ApiError {
    match err {
        // Header shape problems carry no secret material
        AuthenticationError::BearerError(e) => {
            tracing::debug!(error = %e, "Bearer extraction failed");
            ApiError::Unauthorized(e.to_string())
        }
        other => {
            tracing::warn!(error = %other, "Token validation failed");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        }
    }
}
