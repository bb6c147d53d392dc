//! Authentication lookup port: resolves a username into a stored credential.
//!
//! The authorization middleware and the login service depend on this
//! one-method trait so the backing store can be swapped without touching the
//! request pipeline.

use async_trait::async_trait;

use crate::domain::Credential;

use super::define_port_error;

define_port_error! {
    /// Errors raised by the authentication lookup.
    pub enum LookupError {
        /// No user holds the username. The name is kept for diagnostics only.
        NotFound { username: String } => "user not found: {username}",
        /// The backing store failed.
        Internal { message: String } => "user lookup failed: {message}",
    }
}

/// Resolves a username into the credential used for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDetailsService: Send + Sync {
    /// Load the credential for `username`. Pure read.
    async fn load(&self, username: &str) -> Result<Credential, LookupError>;
}
