//! Booking endpoints.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiBooking, BookingQuery, CreateBookingRequest, UpdateBookingRequest};

impl ApiClient {
    /// `POST /bookings` — submit a reservation request.
    ///
    /// Anonymous-submittable by design: no token required. The
    /// `idempotency_key` is sent as an `Idempotency-Key` header so the
    /// backend can collapse duplicate submissions of the same form.
    pub async fn create_booking(
        &self,
        req: &CreateBookingRequest,
        idempotency_key: Uuid,
    ) -> Result<ApiBooking, Error> {
        let key = idempotency_key.to_string();
        self.post_with_headers(
            self.api_url("bookings")?,
            req,
            &[("Idempotency-Key", key.as_str())],
        )
        .await
    }

    /// `GET /bookings` — list bookings visible to the session.
    pub async fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<ApiBooking>, Error> {
        let mut url = self.api_url("bookings")?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query.to_query_pairs() {
                qp.append_pair(&k, &v);
            }
        }
        self.get(url).await
    }

    /// `PATCH /bookings/{id}` — owner-driven status transition.
    pub async fn update_booking(
        &self,
        id: &str,
        req: &UpdateBookingRequest,
    ) -> Result<ApiBooking, Error> {
        self.patch(self.api_url(&format!("bookings/{id}"))?, req).await
    }
}
