/// Current user endpoints
///
/// # Endpoints
///
/// - `GET /profile` - The authenticated user
/// - `PATCH /update` / `PUT /update` - Change name, email and/or password

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::AppJson,
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::{context::AuthUser, password},
    models::user::{normalize_email, UserPatch, UserProfile},
};

/// Profile response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// Update profile request
///
/// Every field is optional; empty strings are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Update profile response
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: UserProfile,
    pub message: String,
}

/// Get the authenticated user
///
/// # Endpoint
///
/// ```text
/// GET /profile
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// { "user": { "id": 1, "name": "Alice", "email": "alice@x.com" } }
/// ```
pub async fn get_profile(Extension(user): Extension<AuthUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: user.profile(),
    })
}

/// Update the authenticated user
///
/// # Endpoint
///
/// ```text
/// PATCH /update
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "name": "Alice B." }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "user": { "id": 1, "name": "Alice B.", "email": "alice@x.com" },
///   "message": "User updated successfully."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: No field given, or the new email is taken
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: The user vanished between the gate and the update
/// - `500 Internal Server Error`: Server error
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let name = super::present(req.name);
    let email = super::present(req.email).map(|email| normalize_email(&email));
    let password = req.password.filter(|password| !password.is_empty());

    let password_hash = match password {
        Some(password) => Some(password::hash_password_async(password).await?),
        None => None,
    };

    let patch = UserPatch {
        name,
        email,
        password_hash,
    };

    if patch.is_empty() {
        return Err(ApiError::BadRequest(
            "Provide at least one of name, email or password.".to_string(),
        ));
    }

    let updated = state
        .store
        .update_user(user.id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    tracing::info!(user_id = updated.id, "User profile updated");

    Ok(Json(UpdateProfileResponse {
        user: UserProfile::from(&updated),
        message: "User updated successfully.".to_string(),
    }))
}
