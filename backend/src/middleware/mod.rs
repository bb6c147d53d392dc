//! Request middleware for cross-cutting concerns.
//!
//! Authorization lives with the HTTP adapter in
//! `inbound::http::authorization`; this module carries request tracing.

pub mod trace;

pub use trace::Trace;
