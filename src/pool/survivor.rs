//! Survivor pool: one team per week, eliminated on a loss.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::{SurvivorEntry, SurvivorPick, SurvivorPickRequest},
};

/// Fetches every survivor entry, alive or eliminated.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn standings(client: &ApiClient) -> Result<Vec<SurvivorEntry>, ApiError> {
    client.get("/api/survivor/standings").await
}

/// Lists the user's survivor picks so far.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn my_picks(client: &ApiClient) -> Result<Vec<SurvivorPick>, ApiError> {
    client.get("/api/survivor/picks").await
}

/// Makes this week's survivor pick. The server rejects teams already used
/// and picks from eliminated entries.
///
/// # Errors
/// Returns an error if the team is blank or the pick is rejected.
pub async fn submit_pick(
    client: &ApiClient,
    request: &SurvivorPickRequest,
) -> Result<SurvivorPick, ApiError> {
    if request.team.trim().is_empty() {
        return Err(ApiError::Invalid("A team is required.".to_string()));
    }
    client.post("/api/survivor/pick", request).await
}
