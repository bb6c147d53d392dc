//! Store-backed authentication lookup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Credential;
use crate::domain::ports::{LookupError, UserDetailsService, UserRepository};

/// Resolves usernames against the user store.
#[derive(Clone)]
pub struct DatabaseUserDetailsService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> DatabaseUserDetailsService<R> {
    /// Create a lookup over the given store.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UserDetailsService for DatabaseUserDetailsService<R>
where
    R: UserRepository + ?Sized,
{
    async fn load(&self, username: &str) -> Result<Credential, LookupError> {
        let user = self
            .repository
            .find_by_username(username)
            .await
            .map_err(|err| LookupError::internal(err.to_string()))?
            .ok_or_else(|| LookupError::not_found(username))?;
        Ok(Credential::from(&user))
    }
}
