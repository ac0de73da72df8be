//! Session feature: auth endpoints, persisted session storage, the auth bridge
//! state machine and the background session poller. Token material lives in
//! `SecretString` values and must never be logged.

pub mod bridge;
pub mod client;
pub mod poll;
pub mod store;
pub mod types;

pub use bridge::{AuthBridge, AuthState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{Role, Session, UserProfile};
