//! Space (venue listing) endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiSpace, CreateSpaceRequest, SpaceQuery, UpdateSpaceRequest};

impl ApiClient {
    /// `GET /spaces` — list spaces, optionally filtered.
    pub async fn list_spaces(&self, query: &SpaceQuery) -> Result<Vec<ApiSpace>, Error> {
        let mut url = self.api_url("spaces")?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query.to_query_pairs() {
                qp.append_pair(&k, &v);
            }
        }
        self.get(url).await
    }

    /// `GET /spaces/{id}`
    pub async fn get_space(&self, id: &str) -> Result<ApiSpace, Error> {
        self.get(self.api_url(&format!("spaces/{id}"))?).await
    }

    /// `POST /spaces` — owner creates a listing.
    pub async fn create_space(&self, req: &CreateSpaceRequest) -> Result<ApiSpace, Error> {
        self.post(self.api_url("spaces")?, req).await
    }

    /// `PATCH /spaces/{id}` — owner updates a listing.
    pub async fn update_space(
        &self,
        id: &str,
        req: &UpdateSpaceRequest,
    ) -> Result<ApiSpace, Error> {
        self.patch(self.api_url(&format!("spaces/{id}"))?, req).await
    }

    /// `DELETE /spaces/{id}`
    pub async fn delete_space(&self, id: &str) -> Result<(), Error> {
        self.delete(self.api_url(&format!("spaces/{id}"))?).await
    }
}
