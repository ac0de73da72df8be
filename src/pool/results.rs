//! Weekly results and season standings.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::{SeasonStanding, WeekResult},
};

/// Fetches every player's record for one week.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn week_results(client: &ApiClient, week_id: i64) -> Result<Vec<WeekResult>, ApiError> {
    client
        .get(&format!("/api/results/week?week_id={week_id}"))
        .await
}

/// Fetches the season table, ordered by rank.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn season_standings(client: &ApiClient) -> Result<Vec<SeasonStanding>, ApiError> {
    let mut standings: Vec<SeasonStanding> = client.get("/api/results/season").await?;
    standings.sort_by_key(|standing| standing.rank);
    Ok(standings)
}
