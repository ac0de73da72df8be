//! Administrator CRUD endpoints. The server enforces the admin role; callers
//! should also gate these behind an admin guard.

use crate::{
    api::{ApiClient, ApiError},
    pool::types::{
        Game, GameInput, Pick, PickUpdate, ScoreInput, UserUpdate, UserWithStats, Week, WeekInput,
    },
};

fn require_id(kind: &str, id: i64) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::Invalid(format!("A valid {kind} id is required.")))
    }
}

/// Lists games, optionally for one week.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn list_games(client: &ApiClient, week_id: Option<i64>) -> Result<Vec<Game>, ApiError> {
    match week_id {
        Some(week_id) => {
            client
                .get(&format!("/api/admin/games?week_id={week_id}"))
                .await
        }
        None => client.get("/api/admin/games").await,
    }
}

/// # Errors
/// Returns an error if the game is rejected.
pub async fn create_game(client: &ApiClient, input: &GameInput) -> Result<Game, ApiError> {
    if input.home_team.trim().is_empty() || input.away_team.trim().is_empty() {
        return Err(ApiError::Invalid("Both teams are required.".to_string()));
    }
    client.post("/api/admin/games", input).await
}

/// # Errors
/// Returns an error if the game does not exist or the update is rejected.
pub async fn update_game(client: &ApiClient, id: i64, input: &GameInput) -> Result<Game, ApiError> {
    let id = require_id("game", id)?;
    client.put(&format!("/api/admin/games/{id}"), input).await
}

/// Records the final score, which grades every pick on the game.
///
/// # Errors
/// Returns an error if the game does not exist or the score is rejected.
pub async fn score_game(client: &ApiClient, id: i64, score: &ScoreInput) -> Result<Game, ApiError> {
    let id = require_id("game", id)?;
    client
        .post(&format!("/api/admin/games/{id}/score"), score)
        .await
}

/// # Errors
/// Returns an error if the game cannot be deleted.
pub async fn delete_game(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let id = require_id("game", id)?;
    client.delete(&format!("/api/admin/games/{id}")).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn list_weeks(client: &ApiClient) -> Result<Vec<Week>, ApiError> {
    client.get("/api/admin/weeks").await
}

/// # Errors
/// Returns an error if the week is rejected.
pub async fn create_week(client: &ApiClient, input: &WeekInput) -> Result<Week, ApiError> {
    client.post("/api/admin/weeks", input).await
}

/// # Errors
/// Returns an error if the week does not exist or the update is rejected.
pub async fn update_week(client: &ApiClient, id: i64, input: &WeekInput) -> Result<Week, ApiError> {
    let id = require_id("week", id)?;
    client.put(&format!("/api/admin/weeks/{id}"), input).await
}

/// # Errors
/// Returns an error if the week cannot be deleted.
pub async fn delete_week(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let id = require_id("week", id)?;
    client.delete(&format!("/api/admin/weeks/{id}")).await
}

/// Lists users with their season totals.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn list_users(client: &ApiClient) -> Result<Vec<UserWithStats>, ApiError> {
    client.get("/api/admin/users").await
}

/// # Errors
/// Returns an error if the user does not exist or the update is rejected.
pub async fn update_user(
    client: &ApiClient,
    id: i64,
    update: &UserUpdate,
) -> Result<UserWithStats, ApiError> {
    let id = require_id("user", id)?;
    client.put(&format!("/api/admin/users/{id}"), update).await
}

/// # Errors
/// Returns an error if the user cannot be deleted.
pub async fn delete_user(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let id = require_id("user", id)?;
    client.delete(&format!("/api/admin/users/{id}")).await
}

/// Lists picks, optionally for one week.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn list_picks(client: &ApiClient, week_id: Option<i64>) -> Result<Vec<Pick>, ApiError> {
    match week_id {
        Some(week_id) => {
            client
                .get(&format!("/api/admin/picks?week_id={week_id}"))
                .await
        }
        None => client.get("/api/admin/picks").await,
    }
}

/// Changes the team on an existing pick.
///
/// # Errors
/// Returns an error if the pick does not exist or the update is rejected.
pub async fn update_pick(client: &ApiClient, id: i64, update: &PickUpdate) -> Result<Pick, ApiError> {
    let id = require_id("pick", id)?;
    client.put(&format!("/api/admin/picks/{id}"), update).await
}

/// # Errors
/// Returns an error if the pick cannot be deleted.
pub async fn delete_pick(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let id = require_id("pick", id)?;
    client.delete(&format!("/api/admin/picks/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pool::testing::{can_bind_localhost, client},
        session::types::Role,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scored_game() -> serde_json::Value {
        json!({
            "id": 9,
            "week_id": 2,
            "home_team": "Bears",
            "away_team": "Packers",
            "spread": -3.5,
            "kickoff": "2026-09-13T17:00:00Z",
            "home_score": 24,
            "away_score": 17,
            "status": "final"
        })
    }

    #[test]
    fn require_id_rejects_non_positive() {
        assert!(require_id("game", 0).is_err());
        assert!(require_id("game", -4).is_err());
        assert_eq!(require_id("game", 12).expect("valid"), 12);
    }

    #[tokio::test]
    async fn score_game_posts_to_game_score_path() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/games/9/score"))
            .and(body_json(json!({ "home_score": 24, "away_score": 17 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(scored_game()))
            .expect(1)
            .mount(&server)
            .await;

        let game = score_game(
            &client(&server),
            9,
            &ScoreInput {
                home_score: 24,
                away_score: 17,
            },
        )
        .await
        .expect("scored");
        assert_eq!(game.home_score, Some(24));
        assert_eq!(game.status, crate::pool::types::GameStatus::Final);
    }

    #[tokio::test]
    async fn deletes_use_delete_verb_and_id_path() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        for target in ["/api/admin/games/9", "/api/admin/weeks/2", "/api/admin/picks/5"] {
            Mock::given(method("DELETE"))
                .and(path(target))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client(&server);
        delete_game(&client, 9).await.expect("game deleted");
        delete_week(&client, 2).await.expect("week deleted");
        delete_pick(&client, 5).await.expect("pick deleted");
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_server() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        let client = client(&server);

        let result = delete_user(&client, 0).await;
        match result {
            Err(err) => assert_eq!(err.to_string(), "Invalid input: A valid user id is required."),
            Ok(()) => panic!("zero id accepted"),
        }
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn update_user_puts_changed_role() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/users/3"))
            .and(body_json(json!({ "role": "admin" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "name": "Cy", "email": "cy@example.com", "role": "admin"
            })))
            .mount(&server)
            .await;

        let user = update_user(
            &client(&server),
            3,
            &UserUpdate {
                role: Some(Role::Admin),
                ..UserUpdate::default()
            },
        )
        .await
        .expect("updated");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.wins, 0);
    }

    #[tokio::test]
    async fn list_picks_filters_by_week() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/picks"))
            .and(query_param("week_id", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 5, "user_id": 3, "game_id": 9, "week_id": 2, "team": "Bears"
            }])))
            .mount(&server)
            .await;

        let picks = list_picks(&client(&server), Some(2)).await.expect("picks");
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].outcome, None);
    }
}
