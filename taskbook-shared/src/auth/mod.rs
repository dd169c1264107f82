/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token issuing and validation
/// - [`context`]: The authenticated user attached to protected requests
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::auth::password::{hash_password, verify_password};
/// use taskbook_shared::auth::jwt::TokenIssuer;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let issuer = TokenIssuer::new("secret-key-at-least-32-bytes-long!!", Duration::hours(24));
/// let token = issuer.issue(42)?;
/// assert_eq!(issuer.verify(&token)?.sub, 42);
/// # Ok(())
/// # }
/// ```

pub mod context;
pub mod jwt;
pub mod password;
