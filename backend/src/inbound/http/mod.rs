//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod authorization;
pub mod error;
pub mod health;
pub mod identity;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
pub mod users;

pub use error::ApiResult;
