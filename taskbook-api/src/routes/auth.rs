/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - Create an account and get a token
/// - `POST /login` - Exchange email and password for a token
///
/// Both respond with the same shape, so a client can treat a fresh
/// registration as an implicit login.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::AppJson,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::password,
    models::user::{normalize_email, CreateUser, User},
};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    /// Email address, normalized before use
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,

    /// Plaintext password
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Register and login response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// User ID
    pub id: i64,

    /// Display name
    pub name: String,

    /// Normalized email
    pub email: String,

    /// Bearer token
    pub token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@x.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "name": "Alice",
///   "email": "alice@x.com",
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or the email is already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
        return Err(ApiError::BadRequest("Name, email and password are required.".to_string()));
    };

    let name = super::present(Some(name))
        .ok_or_else(|| ApiError::BadRequest("Name is required.".to_string()))?;

    let email = normalize_email(&email);
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email is required.".to_string()));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists.".to_string()));
    }

    let password_hash = password::hash_password_async(password).await?;

    // A racing registration still trips the unique constraint
    let user = state
        .store
        .create_user(CreateUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict("User already exists.".to_string()),
            other => other,
        })?;

    let token = state.tokens.issue(user.id)?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

/// Log in
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "alice@x.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Response
///
/// Same shape as [`register`], with `200 OK`.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable)
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::BadRequest("Email and password are required.".to_string()));
    };

    let user = state
        .store
        .find_user_by_email(&normalize_email(&email))
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let valid = password::verify_password_async(password, user.password_hash.clone()).await?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse::new(user, token)))
}
