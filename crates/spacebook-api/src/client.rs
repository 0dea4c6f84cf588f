// Marketplace API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection, and error-body parsing. All endpoint modules (auth, spaces,
// bookings, admin) are implemented as inherent methods via separate files
// to keep this module focused on transport mechanics.

use std::sync::RwLock;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// The backend reports business errors as `{"message": "..."}` with a
/// non-2xx status. Anything else in the body is ignored.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Transport-level settings for building an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Transport {
    /// Path prefix under which the REST API is mounted. Default `/api`.
    pub api_prefix: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept invalid TLS certificates (local/dev backends only).
    pub danger_accept_invalid_certs: bool,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            api_prefix: "/api".into(),
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
        }
    }
}

impl Transport {
    /// Build a `reqwest::Client` from these settings.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .build()?;
        Ok(client)
    }
}

/// Raw HTTP client for the marketplace REST backend.
///
/// Handles URL construction under the configured API prefix, attaches the
/// bearer token to every request when one is set, and translates non-2xx
/// responses into typed [`Error`]s carrying the server's `message` field
/// verbatim when present.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_prefix: String,
    /// Bearer token for authenticated requests. Set after login, cleared
    /// on logout. Requests issued without a token are anonymous.
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a backend root URL and transport settings.
    ///
    /// `base_url` is the backend root (e.g. `https://spacebook.example`);
    /// the API prefix from `transport` is appended to every request path.
    pub fn new(base_url: Url, transport: &Transport) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            api_prefix: transport.api_prefix.clone(),
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this in tests or when sharing a connection pool.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            api_prefix: "/api".into(),
            token: RwLock::new(None),
        }
    }

    /// The backend root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer token management ──────────────────────────────────────

    /// Install a bearer token; subsequent requests carry it.
    pub fn set_token(&self, token: SecretString) {
        debug!("installing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the bearer token; subsequent requests are anonymous.
    pub fn clear_token(&self) {
        debug!("clearing bearer token");
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    /// Apply the stored bearer token to a request builder.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}{prefix}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.api_prefix.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let full = format!("{base}{prefix}/{path}");
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.authorize(self.http.get(url)).send().await?;
        self.parse_body(resp).await
    }

    /// Send a POST request with a JSON body and parse the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        self.parse_body(resp).await
    }

    /// Send a POST request with a JSON body plus extra headers.
    ///
    /// Used by booking submission, which carries an `Idempotency-Key`.
    pub(crate) async fn post_with_headers<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        headers: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let mut builder = self.authorize(self.http.post(url).json(body));
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let resp = builder.send().await?;
        self.parse_body(resp).await
    }

    /// Send a POST request with no meaningful response body.
    pub(crate) async fn post_empty(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self.authorize(self.http.post(url).json(body)).send().await?;
        self.check_status(resp).await
    }

    /// Send a PATCH request with a JSON body and parse the JSON response.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self
            .authorize(self.http.patch(url).json(body))
            .send()
            .await?;
        self.parse_body(resp).await
    }

    /// Send a DELETE request, expecting no meaningful response body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.check_status(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Check the status code and discard the body.
    async fn check_status(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, &resp.text().await.unwrap_or_default()))
    }

    /// Parse a JSON response body, mapping non-2xx statuses to typed errors.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        trace!(bytes = body.len(), "parsing response body");
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Map a non-2xx status + body into a typed error, extracting the
    /// server's `message` field verbatim when the body parses. A body
    /// without one yields `message: None`; callers supply fallbacks.
    fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.message);

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::Authentication { message },
            reqwest::StatusCode::FORBIDDEN => Error::Forbidden { message },
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn api_url_joins_base_prefix_and_path() {
        let url = client("https://spacebook.example").api_url("spaces").unwrap();
        assert_eq!(url.as_str(), "https://spacebook.example/api/spaces");
    }

    #[test]
    fn api_url_normalizes_redundant_slashes() {
        let url = client("https://spacebook.example/")
            .api_url("/auth/me")
            .unwrap();
        assert_eq!(url.as_str(), "https://spacebook.example/api/auth/me");
    }
}
