//! Authentication endpoints: login, registration, session status,
//! logout, role switching, and the owner-upgrade / email-verification
//! flows.
//!
//! None of these methods mutate the client's stored token — token
//! lifecycle is owned by `spacebook-core`, which decides what to persist
//! and when to clear local state regardless of server outcome.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiUser, AuthSession, LoginRequest, RegisterRequest, SwitchRoleResponse};

impl ApiClient {
    /// `POST /auth/login`
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthSession, Error> {
        self.post(self.api_url("auth/login")?, req).await
    }

    /// `POST /auth/register/client`
    pub async fn register_client(&self, req: &RegisterRequest) -> Result<AuthSession, Error> {
        self.post(self.api_url("auth/register/client")?, req).await
    }

    /// `POST /auth/register/owner`
    pub async fn register_owner(&self, req: &RegisterRequest) -> Result<AuthSession, Error> {
        self.post(self.api_url("auth/register/owner")?, req).await
    }

    /// `GET /auth/me` — the authenticated session's user.
    ///
    /// Fails with [`Error::Authentication`] when no valid token is
    /// attached; callers treat that as "anonymous", not as a failure.
    pub async fn me(&self) -> Result<ApiUser, Error> {
        self.get(self.api_url("auth/me")?).await
    }

    /// `POST /auth/logout` — invalidate the server-side session.
    pub async fn logout(&self) -> Result<(), Error> {
        self.post_empty(self.api_url("auth/logout")?, &json!({})).await
    }

    /// `POST /auth/switch-role` — change the active role of a
    /// multi-role user.
    pub async fn switch_role(&self, role: &str) -> Result<SwitchRoleResponse, Error> {
        self.post(self.api_url("auth/switch-role")?, &json!({ "role": role }))
            .await
    }

    /// `POST /auth/upgrade-request` — ask to have the owner role added.
    pub async fn upgrade_request(&self) -> Result<(), Error> {
        self.post_empty(self.api_url("auth/upgrade-request")?, &json!({}))
            .await
    }

    /// `POST /auth/verify-email` — redeem an emailed verification token.
    pub async fn verify_email(&self, token: &str) -> Result<(), Error> {
        self.post_empty(self.api_url("auth/verify-email")?, &json!({ "token": token }))
            .await
    }
}
