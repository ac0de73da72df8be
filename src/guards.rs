//! Access checks for views. Guards are a UX convenience: they render a static
//! message in place of a protected view, and the API still enforces access on
//! every request.

use crate::session::AuthState;

pub const LOGIN_ROUTE: &str = "/login";

pub const MUST_LOG_IN: &str = "You must be logged in to view this page.";
pub const ACCESS_DENIED: &str = "Access denied. You do not have permission to view this page.";

/// Who may see a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Render,
    MustLogIn,
    AccessDenied,
}

impl Guard {
    /// The message shown instead of the view, if any.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Render => None,
            Self::MustLogIn => Some(MUST_LOG_IN),
            Self::AccessDenied => Some(ACCESS_DENIED),
        }
    }
}

/// Decides whether a view with `access` renders for `state`. A login still in
/// flight counts as not logged in.
#[must_use]
pub fn check(state: &AuthState, access: Access) -> Guard {
    match access {
        Access::Public => Guard::Render,
        Access::Authenticated if state.is_authenticated() => Guard::Render,
        Access::Admin if state.is_admin() => Guard::Render,
        Access::Admin if state.is_authenticated() => Guard::AccessDenied,
        Access::Authenticated | Access::Admin => Guard::MustLogIn,
    }
}

/// Navigation the front end should perform after a session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
}

impl Redirect {
    #[must_use]
    pub const fn login() -> Self {
        Self { to: LOGIN_ROUTE }
    }
}
