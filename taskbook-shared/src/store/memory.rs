/// In-memory store
///
/// Keeps users and tasks in ordered maps behind a single `RwLock`. Ids are
/// assigned from per-table counters starting at 1, so ascending id order is
/// creation order, as with `BIGSERIAL`. Email uniqueness is enforced the way
/// the `users_email_key` constraint enforces it in PostgreSQL.
///
/// Used by the API integration tests and for running the server without a
/// database. Nothing is persisted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult, TaskStore, UserStore};
use crate::models::{
    task::{CreateTask, Task, TaskChanges},
    user::{CreateUser, User, UserPatch, DEFAULT_ROLE},
};

/// Name reported for duplicate emails, matching the PostgreSQL constraint
const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_task_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user and, like `ON DELETE CASCADE`, their tasks
    ///
    /// The API never deletes users; this exists for tests of the auth gate's
    /// user-not-found path.
    pub async fn remove_user(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        tables.tasks.retain(|_, task| task.user_id != id);
        tables.users.remove(&id).is_some()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.email_taken(&data.email, None) {
            return Err(StoreError::Conflict(EMAIL_CONSTRAINT.to_string()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role: DEFAULT_ROLE.to_string(),
            created_at: now,
            updated_at: now,
        };

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>> {
        if patch.is_empty() {
            return Ok(None);
        }

        let mut tables = self.tables.write().await;

        if let Some(email) = &patch.email {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::Conflict(EMAIL_CONSTRAINT.to_string()));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        tables.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: tables.last_task_id,
            title: data.title,
            description: data.description,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };

        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner: i64) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;

        // BTreeMap iterates in ascending key order
        Ok(tables
            .tasks
            .values()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: i64, owner: i64) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&id)
            .filter(|task| task.user_id == owner)
            .cloned())
    }

    async fn update_task(&self, id: i64, owner: i64, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        match tables.tasks.get_mut(&id) {
            Some(task) if task.user_id == owner => {
                task.title = changes.title;
                task.description = changes.description;
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_task(&self, id: i64, owner: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .tasks
            .get(&id)
            .is_some_and(|task| task.user_id == owner);
        if owned {
            tables.tasks.remove(&id);
        }

        Ok(owned)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_task(title: &str, user_id: i64) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let store = MemoryStore::new();

        let a = store.create_user(new_user("a@x.com")).await.unwrap();
        let b = store.create_user(new_user("b@x.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.role, DEFAULT_ROLE);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@x.com")).await.unwrap();

        let err = store.create_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref c) if c == EMAIL_CONSTRAINT));
    }

    #[tokio::test]
    async fn test_update_user_to_taken_email_conflicts() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@x.com")).await.unwrap();
        let b = store.create_user(new_user("b@x.com")).await.unwrap();

        let patch = UserPatch {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_user(b.id, patch).await,
            Err(StoreError::Conflict(_))
        ));

        // Keeping your own email is fine
        let patch = UserPatch {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        assert!(store.update_user(b.id, patch).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_user_partial() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@x.com")).await.unwrap();

        let patch = UserPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = store.update_user(user.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryStore::new();
        let patch = UserPatch {
            name: Some("x".to_string()),
            ..Default::default()
        };

        assert!(store.update_user(42, patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tasks_are_owner_scoped() {
        let store = MemoryStore::new();
        let mine = store.create_task(new_task("mine", 1)).await.unwrap();
        let theirs = store.create_task(new_task("theirs", 2)).await.unwrap();

        let listed = store.list_tasks(1).await.unwrap();
        assert_eq!(listed, vec![mine.clone()]);

        assert!(store.find_task(theirs.id, 1).await.unwrap().is_none());

        let changes = TaskChanges {
            title: "hijacked".to_string(),
            description: String::new(),
        };
        assert!(store.update_task(theirs.id, 1, changes).await.unwrap().is_none());
        assert!(!store.delete_task(theirs.id, 1).await.unwrap());

        let untouched = store.find_task(theirs.id, 2).await.unwrap().unwrap();
        assert_eq!(untouched.title, "theirs");
    }

    #[tokio::test]
    async fn test_list_is_ascending() {
        let store = MemoryStore::new();
        for title in ["a", "b", "c"] {
            store.create_task(new_task(title, 1)).await.unwrap();
        }

        let ids: Vec<i64> = store.list_tasks(1).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        let task = store.create_task(new_task("once", 1)).await.unwrap();

        assert!(store.delete_task(task.id, 1).await.unwrap());
        assert!(!store.delete_task(task.id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_user_cascades() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@x.com")).await.unwrap();
        store.create_task(new_task("t", user.id)).await.unwrap();

        assert!(store.remove_user(user.id).await);
        assert!(store.find_user_by_id(user.id).await.unwrap().is_none());
        assert!(store.list_tasks(user.id).await.unwrap().is_empty());
    }
}
