//! Wire types for the marketplace REST API.
//!
//! These mirror the backend's JSON shapes (camelCase fields, optional
//! everywhere the backend has historically omitted values). Canonical
//! domain types live in `spacebook-core`; conversion happens there.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Spaces ──────────────────────────────────────────────────────────

/// A rentable venue listing as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub price_unit: Option<String>,
    #[serde(rename = "type", default)]
    pub space_type: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub availability: Option<ApiAvailability>,
}

/// Availability window with explicitly blocked dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAvailability {
    #[serde(default)]
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub available_to: Option<NaiveDate>,
    #[serde(default)]
    pub excluded_dates: Vec<NaiveDate>,
}

/// Payload for `POST /spaces`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub price: f64,
    pub price_unit: String,
    #[serde(rename = "type")]
    pub space_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<ApiAvailability>,
}

/// Partial payload for `PATCH /spaces/{id}`. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<ApiAvailability>,
}

/// Query parameters for `GET /spaces`.
///
/// `to_query_pairs` emits pairs in a fixed field order so that two
/// logically-equal filters produce identical cache-key fingerprints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceQuery {
    /// Free-text search over name/description.
    pub search: Option<String>,
    pub space_type: Option<String>,
    pub location: Option<String>,
    pub min_capacity: Option<u32>,
    pub featured: Option<bool>,
    /// Restrict to listings owned by the authenticated user.
    pub owned: bool,
}

impl SpaceQuery {
    /// Serialize to URL query pairs, skipping unset fields.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref q) = self.search {
            pairs.push(("q".into(), q.clone()));
        }
        if let Some(ref t) = self.space_type {
            pairs.push(("type".into(), t.clone()));
        }
        if let Some(ref l) = self.location {
            pairs.push(("location".into(), l.clone()));
        }
        if let Some(c) = self.min_capacity {
            pairs.push(("minCapacity".into(), c.to_string()));
        }
        if let Some(f) = self.featured {
            pairs.push(("featured".into(), f.to_string()));
        }
        if self.owned {
            pairs.push(("owned".into(), "true".into()));
        }
        pairs
    }
}

// ── Bookings ────────────────────────────────────────────────────────

/// A reservation request as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBooking {
    pub id: String,
    pub space_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub event_date: NaiveDate,
    /// `HH:MM` wall-clock strings; parsed into `NaiveTime` in core.
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Computed by the backend from the space's listed price.
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for `POST /bookings`. Anonymous-submittable by design.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub space_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for `PATCH /bookings/{id}` (owner-driven status transitions).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingQuery {
    pub space_id: Option<String>,
    pub status: Option<String>,
    /// Restrict to bookings against the authenticated owner's spaces.
    pub owned: bool,
}

impl BookingQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref s) = self.space_id {
            pairs.push(("spaceId".into(), s.clone()));
        }
        if let Some(ref s) = self.status {
            pairs.push(("status".into(), s.clone()));
        }
        if self.owned {
            pairs.push(("owned".into(), "true".into()));
        }
        pairs
    }
}

// ── Users & auth ────────────────────────────────────────────────────

/// A user as the backend serializes it.
///
/// The backend has shipped two role shapes over time: a single `role`
/// string, and a `roles` array with an `activeRole`. Both are accepted
/// here; `spacebook-core` normalizes them into one canonical model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub active_role: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /auth/register/{client,owner}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response to login/register: a bearer token plus the session user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: ApiUser,
}

/// Response to `POST /auth/switch-role`. The backend may rotate the
/// token on a role switch; when absent, the existing token stays valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRoleResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: ApiUser,
}

// ── Admin resources ─────────────────────────────────────────────────

/// An amenity name managed through the admin screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAmenity {
    pub id: String,
    pub name: String,
}

/// A feature flag: name plus on/off state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFeatureFlag {
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}
