/// Middleware for the API server
///
/// - `auth`: Bearer token gate for protected routes
/// - `security`: Security response headers

pub mod auth;
pub mod security;
