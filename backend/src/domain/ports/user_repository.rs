//! Port abstraction for the user store and its errors.
//!
//! Adapters must enforce username uniqueness atomically: a `save` racing with
//! another `save` for the same username fails with
//! [`UserPersistenceError::DuplicateUsername`] rather than storing both.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

/// Persistence port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing if the username is taken.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Every stored user, ordered by username.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove a user; returns whether a record was deleted.
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}

/// Whether `username` is already present in `repository`.
pub async fn exists_by_username<R>(
    repository: &R,
    username: &str,
) -> Result<bool, UserPersistenceError>
where
    R: UserRepository + ?Sized,
{
    Ok(repository.find_by_username(username).await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn exists_by_username_reflects_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        assert!(!exists_by_username(&repo, "ghost").await.expect("lookup succeeds"));
    }

    #[rstest]
    #[tokio::test]
    async fn exists_by_username_propagates_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));
        let err = exists_by_username(&repo, "ann").await.expect_err("error surfaces");
        assert_eq!(err, UserPersistenceError::connection("refused"));
    }

    #[rstest]
    fn duplicate_error_names_the_username() {
        let err = UserPersistenceError::duplicate_username("ann");
        assert_eq!(err.to_string(), "username already exists: ann");
    }
}
