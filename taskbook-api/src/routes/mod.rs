/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `profile`: Current user profile and profile updates
/// - `tasks`: Owner-scoped task CRUD

pub mod auth;
pub mod health;
pub mod profile;
pub mod tasks;

/// `Some` only for a value that is not blank
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(Some("T".to_string())), Some("T".to_string()));
        assert_eq!(present(Some("   ".to_string())), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
    }
}
