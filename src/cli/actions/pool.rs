use crate::{
    api::ApiClient,
    cli::{actions::render, globals::GlobalArgs},
    pool::{
        games, picks, results, survivor,
        types::{PickSubmission, SurvivorPickRequest},
    },
};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub enum Args {
    /// Games for a week; the current week when none is given.
    Games { week: Option<i64> },
    Weeks,
    MyPicks { week: i64 },
    SubmitPicks(PickSubmission),
    WeekResults { week: i64 },
    Season,
    SurvivorStandings,
    SurvivorPicks,
    SurvivorPick(SurvivorPickRequest),
}

/// Execute a pool view.
/// # Errors
/// Returns an error if a request fails or output fails.
pub async fn execute(args: Args, client: &ApiClient, globals: &GlobalArgs) -> Result<()> {
    let json = globals.json;
    match args {
        Args::Games { week } => {
            let week = match week {
                Some(week) => Some(week),
                None => {
                    let current = games::current_week(client).await?;
                    debug!(week = ?current.as_ref().map(|week| week.id), "current week");
                    current.map(|week| week.id)
                }
            };
            let games = games::list_games(client, week).await?;
            render::emit(json, games.as_slice(), render::games)
        }
        Args::Weeks => {
            let weeks = games::list_weeks(client).await?;
            render::emit(json, weeks.as_slice(), render::weeks)
        }
        Args::MyPicks { week } => {
            let picks = picks::my_picks(client, week).await?;
            let games = if json {
                Vec::new()
            } else {
                games::list_games(client, Some(week)).await?
            };
            render::emit(json, picks.as_slice(), |picks| render::picks(picks, &games))
        }
        Args::SubmitPicks(submission) => {
            let response = picks::submit_picks(client, &submission).await?;
            if json {
                render::emit(json, &response, |_| String::new())
            } else {
                println!("Saved {} pick(s) for week {}", response.saved, submission.week_id);
                Ok(())
            }
        }
        Args::WeekResults { week } => {
            let results = results::week_results(client, week).await?;
            render::emit(json, results.as_slice(), render::week_results)
        }
        Args::Season => {
            let standings = results::season_standings(client).await?;
            render::emit(json, standings.as_slice(), render::standings)
        }
        Args::SurvivorStandings => {
            let entries = survivor::standings(client).await?;
            render::emit(json, entries.as_slice(), render::survivor_standings)
        }
        Args::SurvivorPicks => {
            let picks = survivor::my_picks(client).await?;
            render::emit(json, picks.as_slice(), render::survivor_picks)
        }
        Args::SurvivorPick(request) => {
            let pick = survivor::submit_pick(client, &request).await?;
            if json {
                render::emit(json, &pick, |_| String::new())
            } else {
                println!("Survivor pick for week {}: {}", pick.week_id, pick.team);
                Ok(())
            }
        }
    }
}
