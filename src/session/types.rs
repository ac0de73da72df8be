//! Session and identity records. The session token is wrapped in a
//! `SecretString` and must never be logged or printed.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Identity snapshot returned by `/api/users/me` and kept beside the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The one session a client holds at a time.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: SecretString,
    pub expires_at: Option<OffsetDateTime>,
    pub user: Option<UserProfile>,
}

impl Session {
    #[must_use]
    pub fn new(token: SecretString, expires_at: Option<OffsetDateTime>) -> Self {
        Self {
            token,
            expires_at,
            user: None,
        }
    }

    /// True once `expires_at` has passed. Sessions without an expiry never expire
    /// client-side; the server decides.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

/// Token grant returned by `/api/login` and `/api/refresh`.
#[derive(Clone, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

impl From<TokenGrant> for Session {
    fn from(grant: TokenGrant) -> Self {
        Self {
            token: SecretString::from(grant.token),
            expires_at: grant.expires_at,
            user: grant.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn role_deserializes_lowercase() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":7,"name":"Ada","email":"ada@example.com","role":"admin"}"#,
        )
        .expect("profile");
        assert!(profile.is_admin());
        assert_eq!(profile.role.to_string(), "admin");
    }

    #[test]
    fn role_defaults_to_user() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":7,"name":"Ada","email":"ada@example.com"}"#)
                .expect("profile");
        assert_eq!(profile.role, Role::User);
    }

    #[test]
    fn session_expiry() {
        let now = OffsetDateTime::now_utc();
        let expired = Session::new(SecretString::from("t"), Some(now - Duration::minutes(1)));
        let fresh = Session::new(SecretString::from("t"), Some(now + Duration::minutes(1)));
        let open = Session::new(SecretString::from("t"), None);

        assert!(expired.is_expired_at(now));
        assert!(!fresh.is_expired_at(now));
        assert!(!open.is_expired_at(now));
    }

    #[test]
    fn token_grant_debug_redacts_token() {
        let grant: TokenGrant = serde_json::from_str(
            r#"{"token":"super-secret","expires_at":"2026-09-01T12:00:00Z"}"#,
        )
        .expect("grant");
        let debug = format!("{grant:?}");
        assert!(!debug.contains("super-secret"));
        assert!(grant.expires_at.is_some());
    }
}
