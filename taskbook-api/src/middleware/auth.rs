/// Bearer token authentication gate
///
/// Runs in front of every protected route:
///
/// 1. Requires `Authorization: Bearer <token>`
/// 2. Verifies the token signature, issuer and expiry
/// 3. Loads the user named by the token subject
/// 4. Inserts [`AuthUser`] into the request extensions
///
/// Every failure is a 401 with a case-specific message. Expired and
/// malformed tokens are reported the same way.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use taskbook_shared::auth::context::AuthUser;

use crate::{app::AppState, error::ApiError};

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";
pub const USER_NOT_FOUND: &str = "Not authorized, user not found";

/// Extracts the token from an `Authorization` header value
///
/// Returns `None` unless the value is `Bearer ` followed by a non-empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Auth gate middleware, installed with `from_fn_with_state`
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::debug!("Rejected request without bearer token");
            ApiError::Unauthorized(NO_TOKEN.to_string())
        })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected invalid bearer token");
        ApiError::Unauthorized(TOKEN_FAILED.to_string())
    })?;

    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = claims.sub, "Token subject no longer exists");
            ApiError::Unauthorized(USER_NOT_FOUND.to_string())
        })?;

    req.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(req).await)
}
