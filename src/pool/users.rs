//! Current-user endpoints.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::ProfileUpdate,
    session::types::UserProfile,
};

/// Fetches the authenticated user's profile.
///
/// # Errors
/// Returns an error if the request fails; a `401` means no valid session.
pub async fn fetch_me(client: &ApiClient) -> Result<UserProfile, ApiError> {
    client.get("/api/users/me").await
}

/// Updates the authenticated user's profile and returns the stored copy.
///
/// # Errors
/// Returns an error if the update is empty or rejected.
pub async fn update_me(client: &ApiClient, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
    if update.name.is_none() && update.email.is_none() {
        return Err(ApiError::Invalid(
            "At least one profile field is required.".to_string(),
        ));
    }
    client.put("/api/users/me", update).await
}
