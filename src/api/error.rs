use crate::session::store::StoreError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error body the API returns on non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Response error: {0}")]
    Decode(String),
    #[error("Request error: {0}")]
    Encode(String),
    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Builds an HTTP error from a status and the raw response body.
    ///
    /// A body matching [`ErrorBody`] contributes its `code` and the first of
    /// `message`/`error`; anything else falls back to the canonical status text.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let fallback = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self::Http {
                status: status.as_u16(),
                code: parsed.code,
                message: parsed.message.or(parsed.error).unwrap_or(fallback),
            },
            Err(_) => Self::Http {
                status: status.as_u16(),
                code: None,
                message: fallback,
            },
        }
    }

    /// HTTP status for server-side failures, `None` for client-side ones.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable error code, when the server supplied one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Maps a reqwest failure that happened before a response was read.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else {
            Self::Transport(format!("Unable to reach the server: {err}"))
        }
    }
}
