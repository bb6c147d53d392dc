//! Driven port for one-way password hashing.
//!
//! Implementations are synchronous and CPU bound; async callers move them to
//! a blocking thread.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing a password.
    pub enum PasswordHashError {
        /// The hashing primitive rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way hashing of account passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce an encoded hash for `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a previously produced hash.
    ///
    /// Malformed hashes verify as `false`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}

/// Reversible stand-in hasher for tests that should not pay for Argon2.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
impl FixturePasswordHasher {
    const PREFIX: &'static str = "fixture$";
}

#[cfg(any(test, feature = "test-support"))]
impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        PasswordHash::new(format!("{}{password}", Self::PREFIX))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        hash.as_ref()
            .strip_prefix(Self::PREFIX)
            .is_some_and(|stored| stored == password)
    }
}
