// ── Portal ──
//
// Facade over the REST client, the query cache, and the session state
// machine. Every read goes through the cache (read-through with
// per-domain staleness); every mutation invalidates the query-key
// prefixes it affects. Cheap to clone; all clones share state.

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use spacebook_api::models::{
    BookingQuery, CreateBookingRequest, CreateSpaceRequest, LoginRequest, RegisterRequest,
    SpaceQuery, UpdateBookingRequest, UpdateSpaceRequest,
};
use spacebook_api::ApiClient;

use crate::cache::QueryCache;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Amenity, Booking, BookingStatus, FeatureFlag, Role, Space, User};
use crate::query_key::{Domain, QueryKey};
use crate::session::{AuthState, TokenStore};

/// Fallback shown when a role switch fails without a server message.
const ROLE_SWITCH_FALLBACK: &str = "The role could not be switched";

/// A booking request as composed locally, before hitting the wire.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub space_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub event_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub notes: Option<String>,
}

/// Payload for creating or registering an account.
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

struct PortalInner {
    api: ApiClient,
    cache: QueryCache,
    auth: watch::Sender<AuthState>,
    tokens: Arc<dyn TokenStore>,
    cancel: CancellationToken,
}

/// Shared facade over API, cache, and session.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

impl Portal {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let (auth, _) = watch::channel(AuthState::Uninitialized);
        Self {
            inner: Arc::new(PortalInner {
                api,
                cache: QueryCache::new(),
                auth,
                tokens,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Observe session transitions.
    pub fn auth_state(&self) -> watch::Receiver<AuthState> {
        self.inner.auth.subscribe()
    }

    /// Observe cache mutations (version counter).
    pub fn cache_updates(&self) -> watch::Receiver<u64> {
        self.inner.cache.subscribe()
    }

    /// The signed-in user, if the session is authenticated.
    pub fn current_user(&self) -> Option<Arc<User>> {
        self.inner.auth.borrow().user().cloned()
    }

    /// Cancel all in-flight and future operations.
    pub fn shutdown(&self) {
        info!("portal shutting down");
        self.inner.cancel.cancel();
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Establish the initial session state from the persisted token.
    ///
    /// Infallible by contract: any failure along the way (no token,
    /// store error, rejected or unreachable status check) resolves to
    /// `Unauthenticated` rather than an error. Startup must always
    /// land in a definite state.
    pub async fn init(&self) {
        self.inner.auth.send_replace(AuthState::Checking);

        let token = match self.inner.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no persisted token; starting anonymous");
                self.inner.auth.send_replace(AuthState::Unauthenticated);
                return;
            }
            Err(err) => {
                warn!(%err, "token store unreadable; starting anonymous");
                self.inner.auth.send_replace(AuthState::Unauthenticated);
                return;
            }
        };

        self.inner.api.set_token(token);
        let status = self.run(async { Ok(self.inner.api.me().await?) }).await;
        match status.and_then(convert::user) {
            Ok(user) => {
                debug!(user = %user.email, "restored session");
                self.apply_session(user);
            }
            Err(err) => {
                debug!(%err, "session restore failed; starting anonymous");
                self.inner.api.clear_token();
                self.inner.auth.send_replace(AuthState::Unauthenticated);
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Arc<User>, CoreError> {
        let req = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let session = self.run(async { Ok(self.inner.api.login(&req).await?) }).await?;
        self.adopt_session(session.token, session.user)
    }

    /// Register a client account. The new session is signed in.
    pub async fn register_client(&self, signup: Signup) -> Result<Arc<User>, CoreError> {
        let req = register_request(signup);
        let session = self
            .run(async { Ok(self.inner.api.register_client(&req).await?) })
            .await?;
        self.adopt_session(session.token, session.user)
    }

    /// Register an owner account. The new session is signed in.
    pub async fn register_owner(&self, signup: Signup) -> Result<Arc<User>, CoreError> {
        let req = register_request(signup);
        let session = self
            .run(async { Ok(self.inner.api.register_owner(&req).await?) })
            .await?;
        self.adopt_session(session.token, session.user)
    }

    /// Sign out.
    ///
    /// The server call is best-effort; local state is torn down
    /// regardless of its outcome, so logout never fails.
    pub async fn logout(&self) {
        if self.inner.api.has_token() {
            if let Err(err) = self.inner.api.logout().await {
                warn!(%err, "server logout failed; clearing local session anyway");
            }
        }
        self.inner.api.clear_token();
        if let Err(err) = self.inner.tokens.clear() {
            warn!(%err, "could not clear persisted token");
        }

        self.inner.cache.purge(&Domain::Auth.all());
        self.inner.cache.purge(&Domain::Spaces.all().sub("owned"));
        self.inner.cache.purge(&Domain::Bookings.all().sub("owned"));
        self.inner.auth.send_replace(AuthState::Unauthenticated);
        info!("signed out");
    }

    /// Switch the session's active role.
    ///
    /// Guards run locally before any request: single-role accounts get
    /// [`CoreError::RoleSwitchUnavailable`], unassigned roles get
    /// [`CoreError::RoleNotAssigned`]. A server rejection becomes
    /// [`CoreError::RoleSwitchFailed`] carrying the server's message
    /// verbatim when it sent one.
    pub async fn switch_role(&self, role: Role) -> Result<Arc<User>, CoreError> {
        let current = self.current_user().ok_or(CoreError::NotAuthenticated)?;
        if !current.is_multi_role() {
            return Err(CoreError::RoleSwitchUnavailable);
        }
        if !current.has_role(role) {
            return Err(CoreError::RoleNotAssigned {
                role: role.to_string(),
            });
        }
        if current.active_role == role {
            return Ok(current);
        }

        let response = self
            .run(async { Ok(self.inner.api.switch_role(&role.to_string()).await?) })
            .await
            .map_err(|err| match err {
                CoreError::Shutdown => CoreError::Shutdown,
                other => CoreError::RoleSwitchFailed {
                    message: other
                        .server_message()
                        .unwrap_or(ROLE_SWITCH_FALLBACK)
                        .to_owned(),
                },
            })?;

        // The backend may rotate the token on a role switch.
        if let Some(token) = response.token {
            let token = SecretString::from(token);
            self.inner.api.set_token(token.clone());
            if let Err(err) = self.inner.tokens.save(&token) {
                warn!(%err, "could not persist rotated token");
            }
        }

        let user = self.apply_session(convert::user(response.user)?);
        // Role determines which listings and bookings are visible.
        self.inner.cache.invalidate(&Domain::Spaces.all());
        self.inner.cache.invalidate(&Domain::Bookings.all());
        info!(role = %role, "switched active role");
        Ok(user)
    }

    /// Ask the backend to add the owner role to this account.
    pub async fn request_owner_upgrade(&self) -> Result<(), CoreError> {
        if self.current_user().is_none() {
            return Err(CoreError::NotAuthenticated);
        }
        self.run(async { Ok(self.inner.api.upgrade_request().await?) })
            .await?;
        // The user record changes once the upgrade is granted.
        self.inner.cache.invalidate(&Domain::Auth.all());
        Ok(())
    }

    /// Redeem an emailed verification token.
    pub async fn verify_email(&self, token: &str) -> Result<(), CoreError> {
        self.run(async { Ok(self.inner.api.verify_email(token).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Auth.all());
        Ok(())
    }

    // ── Spaces ───────────────────────────────────────────────────────

    /// List spaces matching `query`, cached per filter fingerprint.
    pub async fn spaces(&self, query: &SpaceQuery) -> Result<Arc<Vec<Space>>, CoreError> {
        let key = space_list_key(query);
        self.cached(key, || async {
            let spaces = self.inner.api.list_spaces(query).await?;
            Ok(spaces.into_iter().map(convert::space).collect())
        })
        .await
    }

    /// Fetch a single space, cached under its detail key.
    pub async fn space(&self, id: &str) -> Result<Arc<Space>, CoreError> {
        let key = Domain::Spaces.all().detail(id);
        self.cached(key, || async {
            let space = self.inner.api.get_space(id).await.map_err(|err| {
                if err.is_not_found() {
                    CoreError::NotFound {
                        entity_type: "space".into(),
                        identifier: id.to_owned(),
                    }
                } else {
                    err.into()
                }
            })?;
            Ok(convert::space(space))
        })
        .await
    }

    /// Create a listing (owner role).
    pub async fn create_space(&self, req: &CreateSpaceRequest) -> Result<Space, CoreError> {
        let created = self
            .run(async { Ok(self.inner.api.create_space(req).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Spaces.all());
        Ok(convert::space(created))
    }

    /// Update a listing (owner role).
    pub async fn update_space(
        &self,
        id: &str,
        req: &UpdateSpaceRequest,
    ) -> Result<Space, CoreError> {
        let updated = self
            .run(async { Ok(self.inner.api.update_space(id, req).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Spaces.all());
        Ok(convert::space(updated))
    }

    /// Delete a listing (owner role).
    pub async fn delete_space(&self, id: &str) -> Result<(), CoreError> {
        self.run(async { Ok(self.inner.api.delete_space(id).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Spaces.all());
        // Bookings against the deleted space are now orphaned.
        self.inner.cache.invalidate(&Domain::Bookings.all());
        Ok(())
    }

    // ── Bookings ─────────────────────────────────────────────────────

    /// Submit a booking request. Anonymous submission is allowed.
    ///
    /// Each submission carries a fresh `Idempotency-Key`, so a retried
    /// request cannot double-book.
    pub async fn submit_booking(&self, draft: BookingDraft) -> Result<Booking, CoreError> {
        validate_draft(&draft)?;

        // When the listing is already cached, its availability window
        // rules out blocked dates before the request leaves the process.
        let detail = Domain::Spaces.all().detail(&draft.space_id);
        if let Some(space) = self.inner.cache.get::<Space>(&detail) {
            if let Some(window) = &space.availability {
                if !window.accepts(draft.event_date) {
                    return Err(CoreError::ValidationFailed {
                        field: "event_date".into(),
                        reason: "the space is not available on that date".into(),
                    });
                }
            }
        }

        let idempotency_key = Uuid::new_v4();
        let req = CreateBookingRequest {
            space_id: draft.space_id,
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_phone: draft.customer_phone,
            event_date: draft.event_date,
            start_time: draft.start_time.format("%H:%M").to_string(),
            end_time: draft.end_time.format("%H:%M").to_string(),
            notes: draft.notes,
        };
        let created = self
            .run(async {
                Ok(self
                    .inner
                    .api
                    .create_booking(&req, idempotency_key)
                    .await?)
            })
            .await?;
        self.inner.cache.invalidate(&Domain::Bookings.all());
        convert::booking(created)
    }

    /// List bookings matching `query`, cached per filter fingerprint.
    pub async fn bookings(&self, query: &BookingQuery) -> Result<Arc<Vec<Booking>>, CoreError> {
        let key = booking_list_key(query);
        self.cached(key, || async {
            let bookings = self.inner.api.list_bookings(query).await?;
            bookings.into_iter().map(convert::booking).collect()
        })
        .await
    }

    /// Owner-driven status transition on a booking.
    ///
    /// Statuses no owner transition can produce (`pending`,
    /// `completed`) are rejected locally without a request.
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Booking, CoreError> {
        if !status.owner_settable() {
            return Err(CoreError::ValidationFailed {
                field: "status".into(),
                reason: format!("'{status}' cannot be set by an owner"),
            });
        }
        let req = UpdateBookingRequest {
            status: status.to_string(),
            notes: None,
        };
        let updated = self
            .run(async { Ok(self.inner.api.update_booking(id, &req).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Bookings.all());
        convert::booking(updated)
    }

    // ── Amenities & feature flags ────────────────────────────────────

    /// List amenity options (admin).
    pub async fn amenities(&self) -> Result<Arc<Vec<Amenity>>, CoreError> {
        let key = Domain::Amenities.all().list(&[]);
        self.cached(key, || async {
            let amenities = self.inner.api.list_amenities().await?;
            Ok(amenities
                .into_iter()
                .map(|a| Amenity { id: a.id, name: a.name })
                .collect())
        })
        .await
    }

    /// Create an amenity option (admin).
    pub async fn create_amenity(&self, name: &str) -> Result<Amenity, CoreError> {
        let created = self
            .run(async { Ok(self.inner.api.create_amenity(name).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Amenities.all());
        Ok(Amenity {
            id: created.id,
            name: created.name,
        })
    }

    /// Rename an amenity option (admin).
    pub async fn rename_amenity(&self, id: &str, name: &str) -> Result<Amenity, CoreError> {
        let renamed = self
            .run(async { Ok(self.inner.api.rename_amenity(id, name).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Amenities.all());
        Ok(Amenity {
            id: renamed.id,
            name: renamed.name,
        })
    }

    /// Delete an amenity option (admin).
    pub async fn delete_amenity(&self, id: &str) -> Result<(), CoreError> {
        self.run(async { Ok(self.inner.api.delete_amenity(id).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::Amenities.all());
        Ok(())
    }

    /// List feature flags.
    pub async fn feature_flags(&self) -> Result<Arc<Vec<FeatureFlag>>, CoreError> {
        let key = Domain::FeatureFlags.all().list(&[]);
        self.cached(key, || async {
            let flags = self.inner.api.list_feature_flags().await?;
            Ok(flags
                .into_iter()
                .map(|f| FeatureFlag {
                    name: f.name,
                    enabled: f.enabled,
                    description: f.description,
                })
                .collect())
        })
        .await
    }

    /// Toggle a feature flag (admin).
    pub async fn set_feature_flag(
        &self,
        name: &str,
        enabled: bool,
    ) -> Result<FeatureFlag, CoreError> {
        let flag = self
            .run(async { Ok(self.inner.api.set_feature_flag(name, enabled).await?) })
            .await?;
        self.inner.cache.invalidate(&Domain::FeatureFlags.all());
        Ok(FeatureFlag {
            name: flag.name,
            enabled: flag.enabled,
            description: flag.description,
        })
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Install and persist a fresh session from login/register.
    fn adopt_session(&self, token: String, user: spacebook_api::models::ApiUser) -> Result<Arc<User>, CoreError> {
        let token = SecretString::from(token);
        self.inner.api.set_token(token.clone());
        if let Err(err) = self.inner.tokens.save(&token) {
            // The session still works for this process.
            warn!(%err, "could not persist token");
        }

        let user = self.apply_session(convert::user(user)?);

        // User-scoped branches were computed for the previous identity.
        self.inner.cache.invalidate(&Domain::Spaces.all().sub("owned"));
        self.inner.cache.invalidate(&Domain::Bookings.all().sub("owned"));
        info!(user = %user.email, "signed in");
        Ok(user)
    }

    /// Publish a user as the session: both auth cache entries and the
    /// state channel update together, with no await point in between,
    /// so no observer ever sees one without the other.
    fn apply_session(&self, user: User) -> Arc<User> {
        let user = self.inner.cache.put(QueryKey::auth_user(), user);
        self.inner.cache.put(QueryKey::auth_status(), true);
        self.inner
            .auth
            .send_replace(AuthState::Authenticated(user.clone()));
        user
    }

    /// Read-through cache: serve a fresh entry, else fetch and store.
    async fn cached<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if let Some(hit) = self.inner.cache.get::<T>(&key) {
            return Ok(hit);
        }
        let value = self.run(fetch()).await?;
        Ok(self.inner.cache.put(key, value))
    }

    /// Race `fut` against shutdown.
    async fn run<T>(
        &self,
        fut: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => Err(CoreError::Shutdown),
            res = fut => res,
        }
    }
}

fn register_request(signup: Signup) -> RegisterRequest {
    RegisterRequest {
        name: signup.name,
        email: signup.email,
        password: signup.password,
        phone: signup.phone,
    }
}

fn space_list_key(query: &SpaceQuery) -> QueryKey {
    let root = if query.owned {
        Domain::Spaces.all().sub("owned")
    } else {
        Domain::Spaces.all()
    };
    root.list(&query.to_query_pairs())
}

fn booking_list_key(query: &BookingQuery) -> QueryKey {
    let root = if query.owned {
        Domain::Bookings.all().sub("owned")
    } else {
        Domain::Bookings.all()
    };
    root.list(&query.to_query_pairs())
}

fn validate_draft(draft: &BookingDraft) -> Result<(), CoreError> {
    if draft.customer_name.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            field: "customer_name".into(),
            reason: "must not be empty".into(),
        });
    }
    if !draft.customer_email.contains('@') {
        return Err(CoreError::ValidationFailed {
            field: "customer_email".into(),
            reason: "must be an email address".into(),
        });
    }
    if draft.end_time <= draft.start_time {
        return Err(CoreError::ValidationFailed {
            field: "end_time".into(),
            reason: "must be after the start time".into(),
        });
    }
    Ok(())
}
