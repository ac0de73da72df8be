use crate::{
    api::ApiClient,
    cli::{actions::render, globals::GlobalArgs},
    pool::{
        admin,
        types::{GameInput, PickUpdate, ScoreInput, UserUpdate, WeekInput},
    },
};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug)]
pub enum Args {
    ListGames { week: Option<i64> },
    CreateGame(GameInput),
    UpdateGame { id: i64, input: GameInput },
    ScoreGame { id: i64, score: ScoreInput },
    DeleteGame { id: i64 },
    ListWeeks,
    CreateWeek(WeekInput),
    UpdateWeek { id: i64, input: WeekInput },
    DeleteWeek { id: i64 },
    ListUsers,
    UpdateUser { id: i64, update: UserUpdate },
    DeleteUser { id: i64 },
    ListPicks { week: Option<i64> },
    UpdatePick { id: i64, update: PickUpdate },
    DeletePick { id: i64 },
}

fn saved<T: Serialize>(json: bool, what: &str, id: i64, value: &T) -> Result<()> {
    render::emit(json, value, |_| format!("Saved {what} {id}\n"))
}

fn deleted(what: &str, id: i64) {
    println!("Deleted {what} {id}");
}

/// Execute an admin action.
/// # Errors
/// Returns an error if a request fails or output fails.
pub async fn execute(args: Args, client: &ApiClient, globals: &GlobalArgs) -> Result<()> {
    let json = globals.json;
    match args {
        Args::ListGames { week } => {
            let games = admin::list_games(client, week).await?;
            render::emit(json, games.as_slice(), render::games)?;
        }
        Args::CreateGame(input) => {
            let game = admin::create_game(client, &input).await?;
            saved(json, "game", game.id, &game)?;
        }
        Args::UpdateGame { id, input } => {
            let game = admin::update_game(client, id, &input).await?;
            saved(json, "game", game.id, &game)?;
        }
        Args::ScoreGame { id, score } => {
            let game = admin::score_game(client, id, &score).await?;
            render::emit(json, &game, |game| {
                format!(
                    "Final: {} {} @ {} {}\n",
                    game.away_team, score.away_score, game.home_team, score.home_score
                )
            })?;
        }
        Args::DeleteGame { id } => {
            admin::delete_game(client, id).await?;
            deleted("game", id);
        }
        Args::ListWeeks => {
            let weeks = admin::list_weeks(client).await?;
            render::emit(json, weeks.as_slice(), render::weeks)?;
        }
        Args::CreateWeek(input) => {
            let week = admin::create_week(client, &input).await?;
            saved(json, "week", week.id, &week)?;
        }
        Args::UpdateWeek { id, input } => {
            let week = admin::update_week(client, id, &input).await?;
            saved(json, "week", week.id, &week)?;
        }
        Args::DeleteWeek { id } => {
            admin::delete_week(client, id).await?;
            deleted("week", id);
        }
        Args::ListUsers => {
            let users = admin::list_users(client).await?;
            render::emit(json, users.as_slice(), render::users)?;
        }
        Args::UpdateUser { id, update } => {
            let user = admin::update_user(client, id, &update).await?;
            saved(json, "user", user.id, &user)?;
        }
        Args::DeleteUser { id } => {
            admin::delete_user(client, id).await?;
            deleted("user", id);
        }
        Args::ListPicks { week } => {
            let picks = admin::list_picks(client, week).await?;
            // JSON output carries the server's grades as they are
            let games = if json {
                Vec::new()
            } else {
                admin::list_games(client, week).await?
            };
            render::emit(json, picks.as_slice(), |picks| render::picks(picks, &games))?;
        }
        Args::UpdatePick { id, update } => {
            let pick = admin::update_pick(client, id, &update).await?;
            saved(json, "pick", pick.id, &pick)?;
        }
        Args::DeletePick { id } => {
            admin::delete_pick(client, id).await?;
            deleted("pick", id);
        }
    }
    Ok(())
}
