//! Client-side state for the Spacebook marketplace.
//!
//! The [`Portal`] facade ties together the REST client
//! (`spacebook-api`), a query cache with hierarchical keys and prefix
//! invalidation, and the authentication state machine. Frontends (the
//! CLI, tests) talk only to the Portal; the backend stays a black box
//! behind it.

mod cache;
mod convert;
mod error;
mod portal;
mod query_key;
mod session;

pub mod model;

pub use cache::{QueryCache, StalePolicy};
pub use error::CoreError;
pub use portal::{BookingDraft, Portal, Signup};
pub use query_key::{Domain, QueryKey};
pub use session::{AuthState, MemoryTokenStore, TokenStore};

// Re-exported so frontends can build queries without depending on the
// API crate directly.
pub use spacebook_api::models::{
    BookingQuery, CreateSpaceRequest, SpaceQuery, UpdateSpaceRequest,
};
pub use spacebook_api::{ApiClient, Transport};
