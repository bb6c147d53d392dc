//! User store adapters.
//!
//! Two implementations of the domain `UserRepository` port:
//!
//! - [`InMemoryUserRepository`]: process-local table, used when no database
//!   URL is configured and throughout the test suites.
//! - [`DieselUserRepository`]: PostgreSQL via `diesel-async` and a `bb8`
//!   pool; the schema ships as embedded migrations.
//!
//! Diesel row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use usuarios::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/usuarios")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::run_pending_migrations;
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
