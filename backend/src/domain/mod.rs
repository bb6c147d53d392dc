//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed domain entities and the use-cases built on
//! them, independent of HTTP and storage. Invariants are documented on each
//! type.
//!
//! Public surface:
//! - `Error`: transport-agnostic error payload.
//! - `User`, `UserDraft`, `Username`, `PasswordHash`: the account model.
//! - `Role`, `RoleSet`: permission labels.
//! - `LoginCredentials`, `Credential`, `Principal`: authentication values.
//! - `AuthorizationPolicy`: ordered path table.
//! - `RegistrationService`, `DatabaseUserDetailsService`,
//!   `CredentialsLoginService`, `UsersService`: port implementations.

pub mod auth;
pub mod authorization;
pub mod error;
pub mod login_service;
pub mod ports;
pub mod registration_service;
pub mod role;
pub mod trace_id;
pub mod user;
pub mod user_details_service;
pub mod users_service;

pub use self::auth::{Credential, LoginCredentials, LoginValidationError, Principal};
pub use self::authorization::{AuthorizationPolicy, Decision, Requirement};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login_service::CredentialsLoginService;
pub use self::registration_service::RegistrationService;
pub use self::role::{EmptyRoleSet, Role, RoleSet, UnknownRole};
pub use self::trace_id::TraceId;
pub use self::user::{
    PasswordHash, RequiredField, USERNAME_MAX, User, UserDraft, UserId, UserValidationError,
    Username,
};
pub use self::user_details_service::DatabaseUserDetailsService;
pub use self::users_service::UsersService;
