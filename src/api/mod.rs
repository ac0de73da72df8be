//! HTTP client for the pool API with consistent headers, timeouts and error
//! mapping. Endpoint wrappers in [`crate::pool`] and [`crate::session`] build on
//! the JSON helpers here instead of talking to `reqwest` directly.
//!
//! Credentials are held per client in a [`TokenCache`]; clones of an
//! [`ApiClient`] share it, independent clients do not. Token values are never
//! logged.

pub mod error;
pub mod retry;
pub mod tokens;

pub use error::{ApiError, ErrorBody};
pub use tokens::TokenCache;

use crate::session::{
    store::SessionStore,
    types::{Session, TokenGrant},
};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use retry::{Recovery, RetryBudget};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info_span, warn, Instrument};

/// Header carrying the anti-forgery token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";
/// Default request timeout applied by the underlying HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CSRF_PATH: &str = "/api/csrf-token";
const REFRESH_PATH: &str = "/api/refresh";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct CsrfResponse {
    token: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenCache>,
}

impl ApiClient {
    /// Builds a client with a cookie store, so every request carries the
    /// server's session cookies.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            tokens: Arc::new(TokenCache::new(store)),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Primes the CSRF token at startup. Never fails: the first mutating request
    /// recovers on its own if the token is still missing.
    pub async fn initialize(&self) {
        if let Err(err) = self.fetch_csrf_token().await {
            warn!("failed to prime CSRF token: {err}");
        }
    }

    /// Fetches a fresh CSRF token and replaces the cached one.
    ///
    /// # Errors
    /// Returns an error if the token endpoint fails or returns no token.
    pub async fn fetch_csrf_token(&self) -> Result<(), ApiError> {
        let body = self.send_once(&Method::GET, CSRF_PATH, None).await?;
        let response: CsrfResponse = decode_required(body.as_deref())?;
        self.tokens.set_csrf(SecretString::from(response.token));
        debug!("CSRF token refreshed");
        Ok(())
    }

    /// Refreshes the session with the current credentials. A returned token
    /// supersedes the held one; the CSRF token is refreshed alongside since the
    /// server rotates both together.
    ///
    /// # Errors
    /// Returns an error if the refresh endpoint rejects the session.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let body = self.send_once(&Method::POST, REFRESH_PATH, None).await?;
        if let Some(grant) = decode_optional::<TokenGrant>(body.as_deref())? {
            self.tokens.rotate_session(Session::from(grant))?;
        }

        if let Err(err) = self.fetch_csrf_token().await {
            warn!("session refreshed but CSRF token fetch failed: {err}");
        }
        debug!("session refreshed");
        Ok(())
    }

    /// Fetches JSON with the GET verb.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response has no body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.execute(Method::GET, path, None).await?;
        decode_required(body.as_deref())
    }

    /// Fetches JSON with the GET verb and returns `None` on `204`.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let body = self.execute(Method::GET, path, None).await?;
        decode_optional(body.as_deref())
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response has no body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    /// Posts JSON and ignores any response body.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let payload = encode(body)?;
        self.execute(Method::POST, path, Some(payload)).await?;
        Ok(())
    }

    /// Puts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response has no body.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    /// Deletes a resource and ignores any response body.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Issues a request with any verb, returning `None` for `204` or an empty
    /// body.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError> {
        let payload = body.map(encode).transpose()?;
        let response = self.execute(method, path, payload).await?;
        decode_optional(response.as_deref())
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = encode(body)?;
        let response = self.execute(method, path, Some(payload)).await?;
        decode_required(response.as_deref())
    }

    /// Sends a request and applies the one-shot recoveries. The payload is
    /// encoded once so a replay sends identical bytes.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let mut budget = RetryBudget::default();

        loop {
            let err = match self.send_once(&method, path, payload.as_deref()).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            match budget.take(&err) {
                Some(Recovery::RefetchCsrf) => {
                    debug!(%method, path, "CSRF token rejected; refetching and retrying");
                    if let Err(refetch_err) = self.fetch_csrf_token().await {
                        warn!("CSRF token refetch failed: {refetch_err}");
                        return Err(err);
                    }
                }
                Some(Recovery::RefreshSession) => {
                    debug!(%method, path, "session token expired; refreshing and retrying");
                    if let Err(refresh_err) = self.refresh_session().await {
                        warn!("session refresh failed: {refresh_err}");
                        return Err(err);
                    }
                }
                None => return Err(err),
            }
        }
    }

    /// Issues exactly one HTTP request and maps the outcome.
    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        payload: Option<&[u8]>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let url = build_url(&self.base_url, path);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if *method != Method::GET {
            if let Some(token) = self.tokens.csrf_header() {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        if let Some(bearer) = self.tokens.authorization_header() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(payload) = payload {
            builder = builder.body(payload.to_vec());
        }

        let span = info_span!("api.request", http.method = %method, path = %path);
        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(|err| ApiError::from_transport(&err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_transport(&err))?;

        if !status.is_success() {
            debug!(%method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::from_response(status, &body));
        }

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(None);
        }

        Ok(Some(body.to_vec()))
    }
}

/// Validates the configured base URL and strips its trailing slash.
fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    let parsed = url::Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid API base URL {trimmed:?}: {err}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        scheme => Err(ApiError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

/// Joins the base URL and a path with exactly one slash between them.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body)
        .map_err(|err| ApiError::Encode(format!("Failed to encode request: {err}")))
}

fn decode_optional<T: DeserializeOwned>(body: Option<&[u8]>) -> Result<Option<T>, ApiError> {
    body.map(|bytes| {
        serde_json::from_slice(bytes)
            .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))
    })
    .transpose()
}

fn decode_required<T: DeserializeOwned>(body: Option<&[u8]>) -> Result<T, ApiError> {
    decode_optional(body)?
        .ok_or_else(|| ApiError::Decode("Expected a response body but got none.".to_string()))
}
