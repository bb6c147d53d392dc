//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PasswordHasher`, `UserDetailsService`)
//! are implemented by outbound adapters; driving ports (`UserRegistration`,
//! `LoginService`, `UsersQuery`, `UsersCommand`) are called by inbound
//! adapters. Each exposes a typed error so adapters map failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod user_details_service;
mod user_registration;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(any(test, feature = "test-support"))]
pub use password_hasher::FixturePasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_details_service::MockUserDetailsService;
pub use user_details_service::{LookupError, UserDetailsService};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{
    Registration, RegistrationError, RegistrationRequest, UserRegistration,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository, exists_by_username};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
