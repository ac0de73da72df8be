//! Weekly pick endpoints.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::{Pick, PickSubmission, SubmitPicksResponse},
};

/// Submits the user's picks for a week, replacing earlier picks for the same
/// games.
///
/// # Errors
/// Returns an error if the submission is empty or rejected (for example once
/// the week has locked).
pub async fn submit_picks(
    client: &ApiClient,
    submission: &PickSubmission,
) -> Result<SubmitPicksResponse, ApiError> {
    if submission.picks.is_empty() {
        return Err(ApiError::Invalid("At least one pick is required.".to_string()));
    }
    if submission.picks.iter().any(|pick| pick.team.trim().is_empty()) {
        return Err(ApiError::Invalid("Every pick needs a team.".to_string()));
    }
    client.post("/api/picks/submit", submission).await
}

/// Lists the user's picks for a week.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn my_picks(client: &ApiClient, week_id: i64) -> Result<Vec<Pick>, ApiError> {
    client.get(&format!("/api/picks/week/{week_id}")).await
}
