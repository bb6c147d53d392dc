//! User registration and role-based access control service.
//!
//! - [`domain`]: users, roles, the authorization policy and the use-case
//!   services behind the ports.
//! - [`inbound`]: Actix handlers, session handling and the `Authorize`
//!   middleware.
//! - [`outbound`]: PostgreSQL and in-memory user stores, Argon2 hashing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
