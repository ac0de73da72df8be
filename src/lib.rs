//! # Gridpool (Football Pool Client)
//!
//! `gridpool` is the client side of a football-pool prediction game. Players
//! register, submit weekly picks against point spreads and follow the weekly and
//! season standings; administrators manage games, weeks, users and picks.
//!
//! ## Request Pipeline
//!
//! Every call goes through [`api::ApiClient`], which owns the CSRF token and the
//! session token for one logical client. Mutating verbs carry `X-CSRF-Token`
//! when a token is cached, and every call carries the cookie jar plus the
//! session bearer token when one is held.
//!
//! Two server error codes are recovered transparently:
//!
//! - **`403 csrf_token_invalid`:** the CSRF token is refetched from
//!   `/api/csrf-token` and the request is replayed once.
//! - **`401 token_expired`:** the session is refreshed through `/api/refresh`
//!   and the request is replayed once. If the refresh fails the caller sees the
//!   original `401`.
//!
//! Each recovery is spent at most once per call, so a server that keeps
//! rejecting the replay cannot trap the client in a loop.
//!
//! ## Session State
//!
//! [`session::AuthBridge`] drives the `anonymous → authenticating →
//! authenticated → anonymous` state machine, persists the session to disk and
//! publishes every transition on a watch channel. [`guards`] turns that state
//! into render decisions for protected and admin-only views.

pub mod api;
pub mod boundary;
pub mod cli;
pub mod guards;
pub mod pool;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
