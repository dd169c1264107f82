/// PostgreSQL store
///
/// Thin adapter from the store traits onto the model queries. Unique
/// violations are turned into `StoreError::Conflict` by the `From` impl.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreResult, TaskStore, UserStore};
use crate::db::pool;
use crate::models::{
    task::{CreateTask, Task, TaskChanges},
    user::{CreateUser, User, UserPatch},
};

/// Store backed by a sqlx PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>> {
        Ok(User::update(&self.pool, id, patch).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn list_tasks(&self, owner: i64) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_owner(&self.pool, owner).await?)
    }

    async fn find_task(&self, id: i64, owner: i64) -> StoreResult<Option<Task>> {
        Ok(Task::find_owned(&self.pool, id, owner).await?)
    }

    async fn update_task(&self, id: i64, owner: i64, changes: TaskChanges) -> StoreResult<Option<Task>> {
        Ok(Task::update_owned(&self.pool, id, owner, changes).await?)
    }

    async fn delete_task(&self, id: i64, owner: i64) -> StoreResult<bool> {
        Ok(Task::delete_owned(&self.pool, id, owner).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
