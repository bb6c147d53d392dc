//! Process-local `UserRepository` used when no database is configured.
//!
//! The id table and the username index live behind one `RwLock`, so the
//! uniqueness check and the insert happen under a single write guard.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

#[derive(Debug, Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    by_username: BTreeMap<String, Uuid>,
}

/// In-memory user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user table lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        let username = user.username().as_ref();
        if table.by_username.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username));
        }
        let id = *user.id().as_uuid();
        table.by_username.insert(username.to_owned(), id);
        table.by_id.insert(id, user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.by_id.get(id.as_uuid()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_username
            .values()
            .filter_map(|id| table.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        match table.by_id.remove(id.as_uuid()) {
            Some(user) => {
                table.by_username.remove(user.username().as_ref());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
