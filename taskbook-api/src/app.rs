/// Application state and router builder
///
/// The state is built once in `main` (or by a test) and handed to
/// [`build_router`]. Nothing in the request path reads globals: the store,
/// the token issuer and the configuration all come from here.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskbook_api::{app::{build_router, AppState}, config::Config};
/// use taskbook_shared::store::memory::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post, put},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use taskbook_shared::{auth::jwt::TokenIssuer, store::Store};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Every field
/// is behind an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// User and task storage
    pub store: Arc<dyn Store>,

    /// Token issuer holding the process-wide signing secret
    pub tokens: Arc<TokenIssuer>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state, deriving the token issuer from `config`
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let tokens = TokenIssuer::new(
            config.jwt.secret.clone(),
            Duration::hours(config.jwt.expiration_hours),
        );

        Self {
            store,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health        # Health check (public)
/// ├── POST   /register      # Create account (public)
/// ├── POST   /login         # Exchange credentials for a token (public)
/// ├── GET    /profile       # Current user (bearer)
/// ├── PATCH  /update        # Update name/email/password (bearer)
/// ├── PUT    /update        # Same as PATCH (bearer)
/// ├── POST   /tasks         # Create task (bearer)
/// ├── GET    /tasks         # List own tasks (bearer)
/// ├── GET    /tasks/:id     # Get own task (bearer)
/// ├── PUT    /tasks/:id     # Update own task (bearer)
/// └── DELETE /tasks/:id     # Delete own task (bearer)
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers
/// 2. CORS
/// 3. Request tracing
/// 4. Auth gate (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/profile", get(routes::profile::get_profile))
        .route(
            "/update",
            patch(routes::profile::update_profile).put(routes::profile::update_profile),
        )
        .route(
            "/tasks",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::map_response_with_state(
            state.config.api.production,
            middleware::security::security_headers,
        ))
        .with_state(state)
}

/// CORS policy from the configured origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
