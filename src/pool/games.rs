//! Schedule endpoints: weeks and the games in them.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::{Game, Week},
};

/// Lists games, optionally limited to one week.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn list_games(client: &ApiClient, week_id: Option<i64>) -> Result<Vec<Game>, ApiError> {
    match week_id {
        Some(week_id) => client.get(&format!("/api/games?week_id={week_id}")).await,
        None => client.get("/api/games").await,
    }
}

/// Lists every week of the current season.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn list_weeks(client: &ApiClient) -> Result<Vec<Week>, ApiError> {
    client.get("/api/weeks").await
}

/// Fetches the active week, or `None` outside the season.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn current_week(client: &ApiClient) -> Result<Option<Week>, ApiError> {
    client.get_optional("/api/weeks/current").await
}
