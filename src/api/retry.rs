//! One-shot recovery for the two error codes the server uses to ask the client
//! to fix its credentials and try again.

use super::error::ApiError;

/// Code sent with `403` when the `X-CSRF-Token` header is missing or stale.
pub const CSRF_TOKEN_INVALID: &str = "csrf_token_invalid";
/// Code sent with `401` when the session token has expired but can be refreshed.
pub const TOKEN_EXPIRED: &str = "token_expired";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    RefetchCsrf,
    RefreshSession,
}

/// Returns the recovery an error asks for, if any.
#[must_use]
pub fn classify(err: &ApiError) -> Option<Recovery> {
    match (err.status(), err.code()) {
        (Some(403), Some(CSRF_TOKEN_INVALID)) => Some(Recovery::RefetchCsrf),
        (Some(401), Some(TOKEN_EXPIRED)) => Some(Recovery::RefreshSession),
        _ => None,
    }
}

/// Tracks which recoveries a single call has already spent. Each kind may be
/// used once; after that the error propagates to the caller.
#[derive(Debug, Default)]
pub struct RetryBudget {
    csrf_spent: bool,
    refresh_spent: bool,
}

impl RetryBudget {
    /// Claims the recovery for `err` if it is still available.
    pub fn take(&mut self, err: &ApiError) -> Option<Recovery> {
        let recovery = classify(err)?;
        let spent = match recovery {
            Recovery::RefetchCsrf => &mut self.csrf_spent,
            Recovery::RefreshSession => &mut self.refresh_spent,
        };
        if *spent {
            return None;
        }
        *spent = true;
        Some(recovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, code: Option<&str>) -> ApiError {
        ApiError::Http {
            status,
            code: code.map(str::to_string),
            message: "x".to_string(),
        }
    }

    #[test]
    fn classify_matches_status_and_code() {
        assert_eq!(
            classify(&http(403, Some(CSRF_TOKEN_INVALID))),
            Some(Recovery::RefetchCsrf)
        );
        assert_eq!(
            classify(&http(401, Some(TOKEN_EXPIRED))),
            Some(Recovery::RefreshSession)
        );
        // right code, wrong status
        assert_eq!(classify(&http(401, Some(CSRF_TOKEN_INVALID))), None);
        assert_eq!(classify(&http(403, Some(TOKEN_EXPIRED))), None);
        assert_eq!(classify(&http(401, None)), None);
        assert_eq!(classify(&ApiError::Transport("down".to_string())), None);
    }

    #[test]
    fn budget_allows_each_recovery_once() {
        let mut budget = RetryBudget::default();
        let csrf = http(403, Some(CSRF_TOKEN_INVALID));
        let expired = http(401, Some(TOKEN_EXPIRED));

        assert_eq!(budget.take(&csrf), Some(Recovery::RefetchCsrf));
        assert_eq!(budget.take(&csrf), None);
        assert_eq!(budget.take(&expired), Some(Recovery::RefreshSession));
        assert_eq!(budget.take(&expired), None);
    }

    #[test]
    fn budget_ignores_unrecoverable_errors() {
        let mut budget = RetryBudget::default();

        assert_eq!(budget.take(&http(500, None)), None);
        assert_eq!(
            budget.take(&http(403, Some(CSRF_TOKEN_INVALID))),
            Some(Recovery::RefetchCsrf)
        );
    }
}
