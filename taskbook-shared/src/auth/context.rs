/// Authenticated request context
///
/// After the auth gate has verified a bearer token and loaded the user, it
/// inserts an [`AuthUser`] into the request extensions. Handlers take it with
/// Axum's `Extension` extractor:
///
/// ```ignore
/// async fn handler(Extension(user): Extension<AuthUser>) -> String {
///     format!("Hello, {}!", user.name)
/// }
/// ```

use serde::{Deserialize, Serialize};

use crate::models::user::{User, UserProfile};

/// The user a protected request is acting as
///
/// Carries the public fields only. The password hash never leaves the store
/// layer through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID (from the token subject)
    pub id: i64,

    /// Display name at the time of the request
    pub name: String,

    /// Normalized email at the time of the request
    pub email: String,
}

impl AuthUser {
    /// Public profile view of the authenticated user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_from_user_drops_hash() {
        let user = User {
            id: 3,
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: "user".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let auth = AuthUser::from(user);
        assert_eq!(auth.id, 3);
        assert_eq!(auth.name, "Alice");

        let json = serde_json::to_string(&auth).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_profile_view() {
        let auth = AuthUser {
            id: 1,
            name: "Bob".to_string(),
            email: "bob@x.com".to_string(),
        };

        let profile = auth.profile();
        assert_eq!(profile.id, 1);
        assert_eq!(profile.email, "bob@x.com");
    }
}
