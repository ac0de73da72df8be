//! Auth state for the front end. The bridge owns the login/logout transitions,
//! hydrates from the persisted session, and publishes every state change on a
//! watch channel so views and guards can react.

use crate::{
    api::{ApiClient, ApiError},
    guards::Redirect,
    pool::{types::ProfileUpdate, users},
    session::{
        client,
        types::{Session, UserProfile},
    },
};
use secrecy::SecretString;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(UserProfile),
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(UserProfile::is_admin)
    }
}

#[derive(Clone)]
pub struct AuthBridge {
    client: ApiClient,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthBridge {
    /// Derives the initial state from the session the client loaded. An expired
    /// session is dropped; a token without an identity snapshot stays held but
    /// anonymous until [`AuthBridge::hydrate`] fetches the profile.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let initial = match client.tokens().session() {
            Some(session) if session.is_expired_at(OffsetDateTime::now_utc()) => {
                debug!("persisted session expired; discarding");
                if let Err(err) = client.tokens().clear_session() {
                    warn!("failed to clear expired session: {err}");
                }
                AuthState::Anonymous
            }
            Some(Session {
                user: Some(user), ..
            }) => AuthState::Authenticated(user),
            _ => AuthState::Anonymous,
        };

        let (state, _) = watch::channel(initial);
        Self {
            client,
            state: Arc::new(state),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// True while the client holds a session token, with or without a profile.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.client.tokens().session().is_some()
    }

    fn publish(&self, next: AuthState) {
        self.state.send_replace(next);
    }

    /// Exchanges credentials for a session, stores it, then attaches the
    /// profile from `/api/users/me`. Any failure leaves the bridge anonymous
    /// with no session held.
    ///
    /// # Errors
    /// Returns an error if the login or the profile fetch fails.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserProfile, ApiError> {
        self.publish(AuthState::Authenticating);

        match self.authenticate(email, password).await {
            Ok(user) => {
                info!(user_id = user.id, "logged in");
                self.publish(AuthState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                if let Err(clear_err) = self.client.tokens().clear_session() {
                    warn!("failed to clear session after login error: {clear_err}");
                }
                self.publish(AuthState::Anonymous);
                Err(err)
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &SecretString) -> Result<UserProfile, ApiError> {
        let grant = client::login(&self.client, email, password).await?;
        self.client.tokens().replace_session(Session::from(grant))?;

        let user = users::fetch_me(&self.client).await?;
        self.client.tokens().set_user(user.clone())?;
        Ok(user)
    }

    /// Creates an account without signing in.
    ///
    /// # Errors
    /// Returns an error if the server rejects the registration.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        client::register(&self.client, name, email, password).await
    }

    /// Best-effort server logout followed by an unconditional local clear.
    /// Returns where the front end should go next.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Redirect {
        if let Err(err) = client::logout(&self.client).await {
            warn!("server logout failed; clearing local session anyway: {err}");
        }
        self.expire()
    }

    /// Drops the session locally and returns the login redirect.
    pub fn expire(&self) -> Redirect {
        if let Err(err) = self.client.tokens().clear_session() {
            warn!("failed to clear session: {err}");
        }
        self.publish(AuthState::Anonymous);
        Redirect::login()
    }

    /// Checks an error surfaced anywhere in the app. An unrecoverable `401`
    /// ends the session and yields the login redirect.
    pub fn observe(&self, err: &ApiError) -> Option<Redirect> {
        if err.is_unauthorized() {
            info!("session rejected by server; signing out");
            Some(self.expire())
        } else {
            None
        }
    }

    /// Fetches the current profile when a session is held and refreshes the
    /// snapshot. Returns `None` without a request when no session is held.
    ///
    /// # Errors
    /// Returns an error if the profile fetch fails; a `401` also ends the
    /// session.
    pub async fn hydrate(&self) -> Result<Option<UserProfile>, ApiError> {
        if !self.has_session() {
            return Ok(None);
        }

        match users::fetch_me(&self.client).await {
            Ok(user) => {
                self.client.tokens().set_user(user.clone())?;
                self.publish(AuthState::Authenticated(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                self.observe(&err);
                Err(err)
            }
        }
    }

    /// Updates the profile on the server, then applies the server's copy
    /// locally.
    ///
    /// # Errors
    /// Returns an error if the update is rejected.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let user = users::update_me(&self.client, update).await?;
        self.client.tokens().set_user(user.clone())?;
        if self.is_authenticated() {
            self.publish(AuthState::Authenticated(user.clone()));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ClientConfig,
        guards::LOGIN_ROUTE,
        session::{
            store::{MemorySessionStore, SessionStore},
            types::Role,
        },
    };
    use serde_json::json;
    use std::net::TcpListener;
    use time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: 5,
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            role,
        }
    }

    fn bridge_with(base_url: &str, session: Option<Session>) -> (AuthBridge, Arc<MemorySessionStore>) {
        let store = Arc::new(session.map_or_else(MemorySessionStore::default, MemorySessionStore::with_session));
        let client = ApiClient::new(&ClientConfig::new(base_url), store.clone()).expect("client");
        (AuthBridge::new(client), store)
    }

    #[test]
    fn restores_authenticated_state_from_snapshot() {
        let mut session = Session::new(SecretString::from("t"), None);
        session.user = Some(profile(Role::Admin));
        let (bridge, _) = bridge_with("http://127.0.0.1:9", Some(session));

        assert!(bridge.is_authenticated());
        assert!(bridge.is_admin());
        assert_eq!(bridge.current_user(), Some(profile(Role::Admin)));
    }

    #[test]
    fn token_without_snapshot_is_anonymous() {
        let (bridge, _) = bridge_with(
            "http://127.0.0.1:9",
            Some(Session::new(SecretString::from("t"), None)),
        );

        assert_eq!(bridge.state(), AuthState::Anonymous);
        assert!(bridge.has_session());
    }

    #[test]
    fn expired_session_is_discarded() {
        let mut session = Session::new(
            SecretString::from("t"),
            Some(OffsetDateTime::now_utc() - Duration::hours(1)),
        );
        session.user = Some(profile(Role::User));
        let (bridge, store) = bridge_with("http://127.0.0.1:9", Some(session));

        assert_eq!(bridge.state(), AuthState::Anonymous);
        assert!(!bridge.has_session());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn observe_ends_session_only_on_unauthorized() {
        let mut session = Session::new(SecretString::from("t"), None);
        session.user = Some(profile(Role::User));
        let (bridge, _) = bridge_with("http://127.0.0.1:9", Some(session));
        let mut rx = bridge.subscribe();

        let server_error = ApiError::Http {
            status: 500,
            code: None,
            message: "boom".to_string(),
        };
        assert!(bridge.observe(&server_error).is_none());
        assert!(bridge.is_authenticated());

        let unauthorized = ApiError::Http {
            status: 401,
            code: None,
            message: "Unauthorized".to_string(),
        };
        let redirect = bridge.observe(&unauthorized).expect("redirect");
        assert_eq!(redirect.to, LOGIN_ROUTE);
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), AuthState::Anonymous);
        assert!(!bridge.has_session());
    }

    #[tokio::test]
    async fn login_stores_token_and_profile() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({ "email": "jo@example.com", "password": "hunter2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "session-1",
                "expires_at": "2030-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer session-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Jo",
                "email": "jo@example.com",
                "role": "user"
            })))
            .mount(&server)
            .await;

        let (bridge, store) = bridge_with(&server.uri(), None);
        let user = bridge
            .login("jo@example.com", &SecretString::from("hunter2"))
            .await
            .expect("login");

        assert_eq!(user, profile(Role::User));
        assert_eq!(bridge.state(), AuthState::Authenticated(profile(Role::User)));
        assert!(!bridge.is_admin());
        let stored = store.load().expect("load").expect("stored");
        assert_eq!(stored.user, Some(profile(Role::User)));
    }

    #[tokio::test]
    async fn failed_login_returns_to_anonymous() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "session-1" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (bridge, store) = bridge_with(&server.uri(), None);
        let err = bridge
            .login("jo@example.com", &SecretString::from("hunter2"))
            .await
            .expect_err("profile fetch fails");

        assert_eq!(err.status(), Some(500));
        assert_eq!(bridge.state(), AuthState::Anonymous);
        assert!(store.load().expect("load").is_none());
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_fails() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = Session::new(SecretString::from("t"), None);
        session.user = Some(profile(Role::Admin));
        let (bridge, store) = bridge_with(&server.uri(), Some(session));

        let redirect = bridge.logout().await;

        assert_eq!(redirect, Redirect::login());
        assert_eq!(bridge.state(), AuthState::Anonymous);
        assert!(store.load().expect("load").is_none());
    }

    #[tokio::test]
    async fn hydrate_attaches_profile_and_handles_401() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Jo",
                "email": "jo@example.com",
                "role": "admin"
            })))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Session revoked"
            })))
            .mount(&server)
            .await;

        let (bridge, _) = bridge_with(
            &server.uri(),
            Some(Session::new(SecretString::from("t"), None)),
        );

        let user = bridge.hydrate().await.expect("hydrate").expect("user");
        assert!(user.is_admin());
        assert!(bridge.is_admin());

        let err = bridge.hydrate().await.expect_err("revoked");
        assert!(err.is_unauthorized());
        assert_eq!(bridge.state(), AuthState::Anonymous);

        // no session left, so no request is made
        assert!(bridge.hydrate().await.expect("no session").is_none());
    }

    #[tokio::test]
    async fn update_profile_applies_server_copy() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/users/me"))
            .and(body_json(json!({ "name": "Joanna" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Joanna",
                "email": "jo@example.com",
                "role": "user"
            })))
            .mount(&server)
            .await;

        let mut session = Session::new(SecretString::from("t"), None);
        session.user = Some(profile(Role::User));
        let (bridge, _) = bridge_with(&server.uri(), Some(session));

        let update = ProfileUpdate {
            name: Some("Joanna".to_string()),
            ..ProfileUpdate::default()
        };
        let user = bridge.update_profile(&update).await.expect("update");

        assert_eq!(user.name, "Joanna");
        assert_eq!(bridge.current_user().map(|u| u.name), Some("Joanna".to_string()));
    }
}
