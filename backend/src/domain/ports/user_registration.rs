//! Driving port for account registration.
//!
//! Registration outcomes are explicit: callers match on
//! [`RegistrationError`] and decide how each case is rendered.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{RequiredField, User};

use super::define_port_error;

/// Raw registration input, as supplied by the client.
#[derive(Clone, Default)]
pub struct RegistrationRequest {
    /// Optional human-readable name.
    pub name: Option<String>,
    /// Requested login name.
    pub username: Option<String>,
    /// Raw password; wiped from memory on drop.
    pub password: Option<Zeroizing<String>>,
    /// Requested role names; absent or empty means `USER`.
    pub roles: Option<Vec<String>>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("roles", &self.roles)
            .finish()
    }
}

/// Successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    user: User,
}

impl Registration {
    /// Wrap the freshly stored user.
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// The stored user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Client-facing confirmation, e.g.
    /// `User created successfully with roles: [USER]`.
    pub fn message(&self) -> String {
        format!("User created successfully with roles: {}", self.user.roles())
    }
}

define_port_error! {
    /// Reasons a registration can fail.
    pub enum RegistrationError {
        /// `username` or `password` missing or blank.
        RequiredFieldMissing { field: RequiredField } => "The field {field} is required.",
        /// Another user already holds the username.
        UsernameTaken => "Username already exists",
        /// The username breaks a format rule such as the length limit.
        InvalidUsername { message: String } => "{message}",
        /// A requested role is not one of the accepted names.
        InvalidRole { role: String } => "Invalid role: {role}. Allowed roles: USER, MANAGERS",
        /// Hashing or storage failed; the detail is for logs only.
        Internal { message: String } => "Error creating user: {message}",
    }
}

/// Driving port creating accounts from registration requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate and create an account.
    async fn register(&self, request: RegistrationRequest) -> Result<Registration, RegistrationError>;
}
