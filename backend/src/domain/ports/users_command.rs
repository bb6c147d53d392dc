//! Driving port for user mutations other than registration.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Domain use-case port for removing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Delete the user with `id`; returns whether a record was removed.
    async fn delete_user(&self, id: &UserId) -> Result<bool, Error>;
}
