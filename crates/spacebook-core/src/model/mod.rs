//! Domain model types.
//!
//! These are the normalized, client-side shapes. Wire payloads are
//! decoded into `spacebook_api::models` types and converted here (see
//! [`crate::convert`]); the rest of the crate and the CLI only ever
//! see these.

mod booking;
mod space;
mod user;

pub use booking::{Booking, BookingStatus, CustomerContact};
pub use space::{Amenity, Availability, FeatureFlag, Space};
pub use user::{Role, User};
