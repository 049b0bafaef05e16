//! Authentication store: login, restore from the credential cache, logout,
//! and the bearer token every other store attaches to its requests.

use crate::config::AuthPortal;
use crate::error::ApiError;
use crate::models::auth::LoginResponse;
use crate::models::{AuthUser, CachedSession, Credentials, UserRole};
use crate::reactive::StateContainer;
use crate::service::ApiClient;
use crate::storage::KeyValueStore;
use crate::stores::Store;
use crate::token::decode_claims;
use crate::transport::ApiRequest;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSnapshot {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

impl AuthSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: String, user: AuthUser) -> Self {
        AuthSnapshot {
            token: Some(token),
            user: Some(user),
            is_loading: false,
            error: None,
            is_authenticated: true,
        }
    }

    fn failed(error: String) -> Self {
        AuthSnapshot {
            error: Some(error),
            ..Self::anonymous()
        }
    }
}

/// Cloning shares the same state and cache.
#[derive(Clone)]
pub struct AuthStore {
    state: StateContainer<AuthSnapshot>,
    portal: AuthPortal,
    api: ApiClient,
    cache: Arc<dyn KeyValueStore>,
}

impl Store for AuthStore {
    type Snapshot = AuthSnapshot;

    fn container(&self) -> &StateContainer<AuthSnapshot> {
        &self.state
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl AuthStore {
    /// Starts anonymous; call [`initialize`](Self::initialize) to restore a cached credential.
    pub fn new(portal: AuthPortal, api: ApiClient, cache: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: StateContainer::new(AuthSnapshot::anonymous()),
            portal,
            api,
            cache,
        }
    }

    pub fn portal(&self) -> AuthPortal {
        self.portal
    }

    /// Exchange credentials for a token. The credential is persisted before
    /// the authenticated snapshot is published.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.state.update(|s| AuthSnapshot {
            is_loading: true,
            error: None,
            ..s.clone()
        });
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.authenticate(&credentials).await {
            Ok((token, user)) => {
                tracing::info!(portal = ?self.portal, user = %user.name, "signed in");
                self.state.set(AuthSnapshot::authenticated(token, user));
                true
            }
            Err(err) => {
                tracing::warn!(portal = ?self.portal, error = %err, "login failed");
                self.purge();
                self.state.set(AuthSnapshot::failed(login_error(&err)));
                false
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<(String, AuthUser), ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = ApiRequest::post(self.portal.login_path()).json(body);
        let response: LoginResponse = self.api.fetch(request).await?;
        let user = match self.portal {
            AuthPortal::Admin => admin_user(&response, &credentials.email),
            AuthPortal::Doctor => doctor_user(&response)?,
        };
        self.persist(&response.token, &user)?;
        Ok((response.token, user))
    }

    /// Restore from the credential cache without a network round trip.
    /// Malformed or expired credentials are purged.
    pub fn initialize(&self) {
        match self.restore() {
            Some((token, user)) => {
                tracing::info!(portal = ?self.portal, user = %user.name, "session restored");
                self.state.set(AuthSnapshot::authenticated(token, user));
            }
            None => self.state.set(AuthSnapshot::anonymous()),
        }
    }

    /// Same as [`initialize`](Self::initialize); the doctor client's name for it.
    pub fn check_auth(&self) {
        self.initialize();
    }

    pub fn logout(&self) {
        self.purge();
        self.state.set(AuthSnapshot::anonymous());
        tracing::info!(portal = ?self.portal, "signed out");
    }

    /// Token for an authorized request. Fails before any call when signed
    /// out; an expired token signs the store out.
    pub fn bearer(&self) -> Result<String, ApiError> {
        let token = self
            .state
            .with(|s| s.token.clone())
            .ok_or_else(ApiError::not_authenticated)?;
        if let Ok(claims) = decode_claims(&token) {
            if claims.is_expired(now_ms()) {
                self.expire();
                return Err(ApiError::Auth("Session expired".into()));
            }
        }
        Ok(token)
    }

    /// Id of the signed-in user, when the login supplied one.
    pub fn user_id(&self) -> Option<String> {
        self.state.with(|s| s.user.as_ref().and_then(|u| u.id.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn clear_error(&self) {
        self.state.update(|s| AuthSnapshot {
            error: None,
            ..s.clone()
        });
    }

    fn expire(&self) {
        tracing::info!(portal = ?self.portal, "session expired");
        self.purge();
        self.state.set(AuthSnapshot::anonymous());
    }

    fn persist(&self, token: &str, user: &AuthUser) -> Result<(), ApiError> {
        let key = self.portal.cache_key();
        match self.portal {
            AuthPortal::Admin => self.cache.set(key, token)?,
            AuthPortal::Doctor => {
                let blob = CachedSession {
                    token: token.to_string(),
                    user: user.clone(),
                    timestamp: now_ms(),
                };
                let json = serde_json::to_string(&blob).map_err(|e| ApiError::Storage(e.to_string()))?;
                self.cache.set(key, &json)?;
            }
        }
        Ok(())
    }

    fn purge(&self) {
        if let Err(e) = self.cache.remove(self.portal.cache_key()) {
            tracing::warn!(error = %e, "could not clear cached credential");
        }
    }

    fn restore(&self) -> Option<(String, AuthUser)> {
        let raw = match self.cache.get(self.portal.cache_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "could not read cached credential");
                return None;
            }
        };
        let restored = match self.portal {
            AuthPortal::Admin => restore_token(&raw),
            AuthPortal::Doctor => restore_blob(&raw),
        };
        if restored.is_none() {
            tracing::debug!(portal = ?self.portal, "discarding cached credential");
            self.purge();
        }
        restored
    }
}

/// `user.name`, then `name`, then the e-mail local part, then `User`.
fn admin_user(response: &LoginResponse, email: &str) -> AuthUser {
    let name = response
        .user
        .as_ref()
        .and_then(|u| u.name.clone())
        .or_else(|| response.name.clone())
        .filter(|n| !n.trim().is_empty())
        .or_else(|| email.split('@').next().filter(|p| !p.is_empty()).map(String::from))
        .unwrap_or_else(|| "User".to_string());
    AuthUser {
        role: Some(UserRole::Admin),
        ..AuthUser::named(name)
    }
}

fn doctor_user(response: &LoginResponse) -> Result<AuthUser, ApiError> {
    if let Some(t) = &response.therapist {
        return Ok(AuthUser {
            id: t.id.clone(),
            name: t.name.clone(),
            email: t.email.clone(),
            role: Some(UserRole::Doctor),
        });
    }
    let claims = decode_claims(&response.token)?;
    let name = claims
        .display_name()
        .ok_or_else(|| ApiError::Decode("login response carries no identity".into()))?;
    Ok(AuthUser {
        id: None,
        name,
        email: claims.sub.clone(),
        role: Some(UserRole::Doctor),
    })
}

fn restore_token(token: &str) -> Option<(String, AuthUser)> {
    let claims = decode_claims(token).ok()?;
    if claims.is_expired(now_ms()) {
        return None;
    }
    let name = claims.display_name().unwrap_or_else(|| "User".to_string());
    let user = AuthUser {
        role: Some(UserRole::Admin),
        ..AuthUser::named(name)
    };
    Some((token.to_string(), user))
}

fn restore_blob(raw: &str) -> Option<(String, AuthUser)> {
    let blob: CachedSession = serde_json::from_str(raw).ok()?;
    // Opaque tokens carry no expiry; trust the blob.
    if let Ok(claims) = decode_claims(&blob.token) {
        if claims.is_expired(now_ms()) {
            return None;
        }
    }
    Some((blob.token, blob.user))
}

fn login_error(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, message: None } => format!("Login failed with status {}", status),
        other => other.message_or("Login failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::{expired_token, harness, live_token};
    use serde_json::json;
    use std::sync::Mutex;

    #[tokio::test]
    async fn admin_login_caches_bare_token() {
        let h = harness(AuthPortal::Admin);
        let token = live_token("ops@example.org");
        h.transport.json(200, json!({"token": token}));

        assert!(h.auth.login("ops@example.org", "secret").await);

        let snap = h.auth.snapshot();
        assert!(snap.is_authenticated);
        assert_eq!(snap.user.unwrap().name, "ops");
        assert_eq!(h.cache.get("authToken").unwrap(), Some(token));
        let sent = &h.transport.requests()[0];
        assert_eq!(sent.path, "/api/auth/login");
        assert!(sent.bearer.is_none());
    }

    #[tokio::test]
    async fn admin_login_prefers_user_name_from_response() {
        let h = harness(AuthPortal::Admin);
        h.transport.json(200, json!({"token": "opaque", "user": {"name": "Nimal"}, "name": "ignored"}));
        assert!(h.auth.login("n@example.org", "pw").await);
        assert_eq!(h.auth.snapshot().user.unwrap().name, "Nimal");
    }

    #[tokio::test]
    async fn failed_login_publishes_anonymous_with_server_message() {
        let h = harness(AuthPortal::Admin);
        h.cache.set("authToken", "stale").unwrap();
        h.transport.json(401, json!({"message": "Bad credentials"}));

        assert!(!h.auth.login("a@b.c", "wrong").await);

        let snap = h.auth.snapshot();
        assert!(!snap.is_authenticated);
        assert!(!snap.is_loading);
        assert!(snap.token.is_none());
        assert_eq!(snap.error.as_deref(), Some("Bad credentials"));
        assert_eq!(h.cache.get("authToken").unwrap(), None);
    }

    #[tokio::test]
    async fn failed_login_without_message_names_status() {
        let h = harness(AuthPortal::Admin);
        h.transport.raw(500, "");
        assert!(!h.auth.login("a@b.c", "pw").await);
        assert_eq!(h.auth.snapshot().error.as_deref(), Some("Login failed with status 500"));
    }

    #[tokio::test]
    async fn login_shows_loading_then_settles() {
        let h = harness(AuthPortal::Admin);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = h.auth.subscribe(move |s| sink.lock().unwrap().push((s.is_loading, s.is_authenticated)));
        h.transport.json(200, json!({"token": live_token("x@y.z")}));

        h.auth.login("x@y.z", "pw").await;

        assert_eq!(*seen.lock().unwrap(), vec![(false, false), (true, false), (false, true)]);
    }

    #[tokio::test]
    async fn doctor_login_caches_session_blob() {
        let h = harness(AuthPortal::Doctor);
        h.transport.json(
            200,
            json!({"token": live_token("jay@example.org"), "therapist": {"id": 7, "name": "Dr. Jay", "email": "jay@example.org"}}),
        );

        assert!(h.auth.login("jay@example.org", "pw").await);

        assert_eq!(h.transport.requests()[0].path, "/api/auth/doctor-login");
        assert_eq!(h.auth.user_id().as_deref(), Some("7"));
        let blob: CachedSession = serde_json::from_str(&h.cache.get("manosara_auth").unwrap().unwrap()).unwrap();
        assert_eq!(blob.user.name, "Dr. Jay");
        assert!(blob.timestamp > 0);
    }

    #[tokio::test]
    async fn doctor_login_without_identity_fails() {
        let h = harness(AuthPortal::Doctor);
        h.transport.json(200, json!({"token": "opaque"}));
        assert!(!h.auth.login("jay@example.org", "pw").await);
        assert!(h.auth.snapshot().error.is_some());
        assert_eq!(h.cache.get("manosara_auth").unwrap(), None);
    }

    #[test]
    fn initialize_restores_valid_admin_token() {
        let h = harness(AuthPortal::Admin);
        h.cache.set("authToken", &live_token("admin@example.org")).unwrap();
        h.auth.initialize();
        let snap = h.auth.snapshot();
        assert!(snap.is_authenticated);
        assert_eq!(snap.user.unwrap().name, "admin");
        assert_eq!(h.transport.request_count(), 0);
    }

    #[test]
    fn initialize_purges_expired_or_malformed_admin_token() {
        for cached in [expired_token("admin@example.org"), "not-a-jwt".to_string()] {
            let h = harness(AuthPortal::Admin);
            h.cache.set("authToken", &cached).unwrap();
            h.auth.initialize();
            assert_eq!(h.auth.snapshot(), AuthSnapshot::anonymous());
            assert_eq!(h.cache.get("authToken").unwrap(), None);
        }
    }

    #[test]
    fn check_auth_restores_or_purges_doctor_blob() {
        let h = harness(AuthPortal::Doctor);
        let blob = CachedSession {
            token: live_token("jay@example.org"),
            user: AuthUser::named("Dr. Jay"),
            timestamp: 1,
        };
        h.cache.set("manosara_auth", &serde_json::to_string(&blob).unwrap()).unwrap();
        h.auth.check_auth();
        assert_eq!(h.auth.snapshot().user.unwrap().name, "Dr. Jay");

        let h = harness(AuthPortal::Doctor);
        h.cache.set("manosara_auth", "{broken").unwrap();
        h.auth.check_auth();
        assert!(!h.auth.is_authenticated());
        assert_eq!(h.cache.get("manosara_auth").unwrap(), None);
    }

    #[test]
    fn check_auth_purges_doctor_blob_with_expired_token() {
        let h = harness(AuthPortal::Doctor);
        let blob = CachedSession {
            token: expired_token("jay@example.org"),
            user: AuthUser::named("Dr. Jay"),
            timestamp: 1,
        };
        h.cache.set("manosara_auth", &serde_json::to_string(&blob).unwrap()).unwrap();

        h.auth.check_auth();

        let snap = h.auth.snapshot();
        assert!(!snap.is_authenticated);
        assert_eq!(snap.token, None);
        assert_eq!(snap.user, None);
        assert_eq!(h.cache.get("manosara_auth").unwrap(), None);
    }

    #[test]
    fn logout_clears_everything_in_one_change() {
        let h = harness(AuthPortal::Admin);
        h.cache.set("authToken", &live_token("admin@example.org")).unwrap();
        h.auth.initialize();
        let before = h.auth.container().version();

        h.auth.logout();

        assert_eq!(h.auth.container().version(), before + 1);
        assert_eq!(h.auth.snapshot(), AuthSnapshot::anonymous());
        assert_eq!(h.cache.get("authToken").unwrap(), None);
    }

    #[test]
    fn bearer_requires_a_token() {
        let h = harness(AuthPortal::Admin);
        assert_eq!(h.auth.bearer(), Err(ApiError::not_authenticated()));
    }

    #[test]
    fn bearer_signs_out_on_expired_token() {
        let h = harness(AuthPortal::Doctor);
        let token = expired_token("jay@example.org");
        h.auth.container().set(AuthSnapshot::authenticated(token.clone(), AuthUser::named("Dr. Jay")));
        h.cache.set("manosara_auth", "{}").unwrap();

        assert_eq!(h.auth.bearer(), Err(ApiError::Auth("Session expired".into())));
        assert!(!h.auth.is_authenticated());
        assert_eq!(h.cache.get("manosara_auth").unwrap(), None);
    }

    #[test]
    fn clear_error_keeps_the_rest() {
        let h = harness(AuthPortal::Admin);
        h.auth.container().set(AuthSnapshot::failed("Bad credentials".into()));
        h.auth.clear_error();
        assert_eq!(h.auth.snapshot(), AuthSnapshot::anonymous());
    }
}
