/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     role TEXT NOT NULL DEFAULT 'user',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Emails are stored normalized (see [`normalize_email`]), so equality in SQL
/// is enough for case-insensitive lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::update::UpdateBuilder;

/// Role assigned to every self-registered account
pub const DEFAULT_ROLE: &str = "user";

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

/// Normalizes an email for storage and lookup: trims and lowercases
///
/// ```
/// use taskbook_shared::models::user::normalize_email;
///
/// assert_eq!(normalize_email("  ALICE@X.com "), "alice@x.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A user row, including the password hash
///
/// Intentionally not `Serialize`: responses use [`UserProfile`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Display name
    pub name: String,

    /// Normalized email address
    pub email: String,

    /// Argon2id PHC string
    pub password_hash: String,

    /// Always [`DEFAULT_ROLE`]
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address, already normalized
    pub email: String,

    /// Argon2id hash (NOT the plaintext password)
    pub password_hash: String,
}

/// Fields to change on an existing user
///
/// `None` leaves the column untouched. Email must already be normalized and
/// the password already hashed.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    /// Turns the patch into an update builder over the `users` table
    pub fn into_builder(self) -> UpdateBuilder<String> {
        UpdateBuilder::new("users")
            .set_opt("name", self.name)
            .set_opt("email", self.email)
            .set_opt("password_hash", self.password_hash)
            .touch("updated_at")
    }
}

impl User {
    /// Inserts a new user with the default role
    ///
    /// # Errors
    ///
    /// Returns a database error if the email is already taken
    /// (`users_email_key` unique violation) or the connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(DEFAULT_ROLE)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by (normalized) email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Applies `patch` to the user with `id` in a single statement
    ///
    /// Returns `None` if the patch is empty or no such user exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(stmt) = patch.into_builder().build("id", USER_COLUMNS) else {
            return Ok(None);
        };

        let mut query = sqlx::query_as::<_, User>(&stmt.sql);
        for value in stmt.values {
            query = query.bind(value);
        }

        let user = query.bind(id).fetch_optional(pool).await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("alice@x.com"), "alice@x.com");
        assert_eq!(normalize_email("ALICE@X.COM "), "alice@x.com");
        assert_eq!(normalize_email("\t Bob@Example.org\n"), "bob@example.org");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn test_user_patch_default_is_empty() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert!(patch.into_builder().build("id", USER_COLUMNS).is_none());
    }

    #[test]
    fn test_user_patch_statement() {
        let patch = UserPatch {
            name: Some("Alice".to_string()),
            email: None,
            password_hash: Some("hash".to_string()),
        };
        assert!(!patch.is_empty());

        let stmt = patch.into_builder().build("id", "id, name, email").unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE users SET name = $1, password_hash = $2, updated_at = NOW() WHERE id = $3 RETURNING id, name, email"
        );
        assert_eq!(stmt.values, vec!["Alice".to_string(), "hash".to_string()]);
    }

    #[test]
    fn test_profile_from_user() {
        let user = User {
            id: 9,
            name: "Carol".to_string(),
            email: "carol@x.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["email"], "carol@x.com");
        assert!(json.get("password_hash").is_none());
    }
}
