/// Database models for Taskbook
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `task`: Tasks owned by a single user
///
/// Each model carries its own SQL as associated functions taking a `PgPool`.
/// Handlers do not call these directly; they go through the traits in
/// [`crate::store`], whose PostgreSQL implementation delegates here.

pub mod task;
pub mod user;
