//! Admin endpoints: amenity CRUD and feature flags.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiAmenity, ApiFeatureFlag};

impl ApiClient {
    // ── Amenities ────────────────────────────────────────────────────

    /// `GET /admin/amenities`
    pub async fn list_amenities(&self) -> Result<Vec<ApiAmenity>, Error> {
        self.get(self.api_url("admin/amenities")?).await
    }

    /// `POST /admin/amenities`
    pub async fn create_amenity(&self, name: &str) -> Result<ApiAmenity, Error> {
        self.post(self.api_url("admin/amenities")?, &json!({ "name": name }))
            .await
    }

    /// `PATCH /admin/amenities/{id}`
    pub async fn rename_amenity(&self, id: &str, name: &str) -> Result<ApiAmenity, Error> {
        self.patch(
            self.api_url(&format!("admin/amenities/{id}"))?,
            &json!({ "name": name }),
        )
        .await
    }

    /// `DELETE /admin/amenities/{id}`
    pub async fn delete_amenity(&self, id: &str) -> Result<(), Error> {
        self.delete(self.api_url(&format!("admin/amenities/{id}"))?)
            .await
    }

    // ── Feature flags ────────────────────────────────────────────────

    /// `GET /feature-flags`
    pub async fn list_feature_flags(&self) -> Result<Vec<ApiFeatureFlag>, Error> {
        self.get(self.api_url("feature-flags")?).await
    }

    /// `PATCH /feature-flags/{name}`
    pub async fn set_feature_flag(
        &self,
        name: &str,
        enabled: bool,
    ) -> Result<ApiFeatureFlag, Error> {
        self.patch(
            self.api_url(&format!("feature-flags/{name}"))?,
            &json!({ "enabled": enabled }),
        )
        .await
    }
}
