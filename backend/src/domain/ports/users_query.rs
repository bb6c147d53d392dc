//! Driving port for user-facing reads.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing and fetching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user holding `username`, or a `not_found` error.
    async fn find_user(&self, username: &str) -> Result<User, Error>;
}
