//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: in-memory and PostgreSQL (Diesel) user stores
//! - **security**: Argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;
