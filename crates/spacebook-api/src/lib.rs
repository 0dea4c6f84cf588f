//! Async client for the Spacebook venue marketplace REST backend.
//!
//! [`ApiClient`] owns transport mechanics: base-URL construction under a
//! configurable `/api` prefix, bearer-token injection, and translation of
//! non-2xx responses into typed [`Error`]s that carry the server's
//! `message` field verbatim. Endpoint methods are grouped one file per
//! resource domain (auth, spaces, bookings, admin).
//!
//! This crate is deliberately stateless beyond the installed token:
//! caching, session state, and invalidation policy live in
//! `spacebook-core`.

mod admin;
mod auth;
mod bookings;
mod client;
pub mod error;
pub mod models;
mod spaces;

pub use client::{ApiClient, Transport};
pub use error::Error;
