/// Storage traits for users and tasks
///
/// Handlers depend on these traits rather than on a concrete pool, so the
/// same router runs against PostgreSQL in production and against the
/// in-memory store in tests.
///
/// # Implementations
///
/// - [`postgres::PgStore`]: sqlx / PostgreSQL, delegating to the models
/// - [`memory::MemoryStore`]: process-local maps behind a lock
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskbook_shared::store::{memory::MemoryStore, Store, TaskStore};
/// use taskbook_shared::models::task::CreateTask;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
///
/// let task = store
///     .create_task(CreateTask {
///         title: "Write docs".to_string(),
///         description: String::new(),
///         user_id: 1,
///     })
///     .await?;
///
/// assert_eq!(store.list_tasks(1).await?, vec![task]);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::{
    task::{CreateTask, Task, TaskChanges},
    user::{CreateUser, User, UserPatch},
};

pub mod memory;
pub mod postgres;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. duplicate email)
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return StoreError::Conflict(constraint);
            }
        }

        StoreError::Database(err)
    }
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user; `StoreError::Conflict` if the email is taken
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Looks a user up by id
    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// Looks a user up by normalized email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Applies a patch; `None` if the user does not exist or the patch is empty
    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>>;
}

/// Task persistence, always scoped to an owner
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Tasks owned by `owner`, ascending by id
    async fn list_tasks(&self, owner: i64) -> StoreResult<Vec<Task>>;

    /// A single task, only if owned by `owner`
    async fn find_task(&self, id: i64, owner: i64) -> StoreResult<Option<Task>>;

    /// Updates a task, only if owned by `owner`
    async fn update_task(&self, id: i64, owner: i64, changes: TaskChanges) -> StoreResult<Option<Task>>;

    /// Deletes a task, only if owned by `owner`; true if a row was removed
    async fn delete_task(&self, id: i64, owner: i64) -> StoreResult<bool>;
}

/// Everything the API needs from storage
#[async_trait]
pub trait Store: UserStore + TaskStore {
    /// Short backend name for health output
    fn backend(&self) -> &'static str;

    /// Checks the backend is reachable
    async fn health_check(&self) -> StoreResult<()>;
}
