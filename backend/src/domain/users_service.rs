//! User listing, lookup and deletion services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserId};

/// Store-backed implementation of [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UsersService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> UsersService<R> {
    /// Create a service over the given store.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username already exists: {username}"))
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_persistence_error)
    }

    async fn find_user(&self, username: &str) -> Result<User, Error> {
        self.repository
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user not found: {username}")))
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository + ?Sized,
{
    async fn delete_user(&self, id: &UserId) -> Result<bool, Error> {
        let deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted {
            info!(user_id = %id, "user deleted");
        }
        Ok(deleted)
    }
}
