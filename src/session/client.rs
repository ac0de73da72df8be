//! Wrappers for the auth endpoints. Credentials pass straight into the request
//! body and must never be logged.

use crate::{
    api::{ApiClient, ApiError},
    session::types::TokenGrant,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Exchanges credentials for a session token.
///
/// # Errors
/// Returns an error if the credentials are rejected or the request fails.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<TokenGrant, ApiError> {
    let body = Credentials {
        email,
        password: password.expose_secret(),
    };
    client.post("/api/login", &body).await
}

/// Creates an account. Registration does not sign the user in.
///
/// # Errors
/// Returns an error if the server rejects the registration.
pub async fn register(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), ApiError> {
    let body = Registration {
        name,
        email,
        password: password.expose_secret(),
    };
    client.post_empty("/api/register", &body).await
}

/// Invalidates the session on the server.
///
/// # Errors
/// Returns an error if the server cannot be reached or rejects the call.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.post_empty("/api/logout", &serde_json::json!({})).await
}
