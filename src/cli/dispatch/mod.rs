//! Command-line argument dispatch.
//!
//! Maps validated subcommand matches to the [`Action`] they describe. Nothing
//! here touches the network.

use crate::cli::actions::{admin, pool, session, Action};
use crate::cli::commands::{admin as admin_cmd, auth, pool as pool_cmd};
use crate::pool::types::{
    GameInput, PickSelection, PickSubmission, PickUpdate, ProfileUpdate, ScoreInput,
    SurvivorPickRequest, UserUpdate, WeekInput,
};
use crate::session::Role;
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::time::Duration;

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn optional_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn subcommand(matches: &ArgMatches) -> Result<(&str, &ArgMatches)> {
    matches.subcommand().context("missing subcommand")
}

fn unknown(name: &str) -> anyhow::Error {
    anyhow!("unknown subcommand: {name}")
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if a subcommand or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub_m) = subcommand(matches)?;

    match name {
        auth::CMD_LOGIN => Ok(Action::Session(session::Args::Login {
            email: required(sub_m, auth::ARG_EMAIL)?,
            password: optional_string(sub_m, auth::ARG_PASSWORD).map(SecretString::from),
        })),
        auth::CMD_LOGOUT => Ok(Action::Session(session::Args::Logout)),
        auth::CMD_REGISTER => Ok(Action::Session(session::Args::Register {
            name: required(sub_m, auth::ARG_NAME)?,
            email: required(sub_m, auth::ARG_EMAIL)?,
            password: optional_string(sub_m, auth::ARG_PASSWORD).map(SecretString::from),
        })),
        auth::CMD_WHOAMI => Ok(Action::Session(session::Args::WhoAmI {
            follow: sub_m.get_flag(auth::ARG_FOLLOW),
            interval: Duration::from_secs(required(sub_m, auth::ARG_INTERVAL)?),
        })),
        auth::CMD_PROFILE => Ok(Action::Session(session::Args::Profile(ProfileUpdate {
            name: optional_string(sub_m, auth::ARG_NAME),
            email: optional_string(sub_m, auth::ARG_EMAIL),
        }))),
        pool_cmd::CMD_GAMES => Ok(Action::Pool(pool::Args::Games {
            week: sub_m.get_one::<i64>(pool_cmd::ARG_WEEK).copied(),
        })),
        pool_cmd::CMD_WEEKS => Ok(Action::Pool(pool::Args::Weeks)),
        pool_cmd::CMD_PICKS => picks(sub_m).map(Action::Pool),
        pool_cmd::CMD_RESULTS => results(sub_m).map(Action::Pool),
        pool_cmd::CMD_SURVIVOR => survivor(sub_m).map(Action::Pool),
        admin_cmd::CMD_ADMIN => admin_action(sub_m).map(Action::Admin),
        other => Err(unknown(other)),
    }
}

fn picks(matches: &ArgMatches) -> Result<pool::Args> {
    let (name, sub_m) = subcommand(matches)?;
    let week = required(sub_m, pool_cmd::ARG_WEEK)?;

    match name {
        pool_cmd::CMD_LIST => Ok(pool::Args::MyPicks { week }),
        pool_cmd::CMD_SUBMIT => {
            let picks: Vec<PickSelection> = sub_m
                .get_many::<PickSelection>(pool_cmd::ARG_PICK)
                .context("missing required argument: --pick")?
                .cloned()
                .collect();
            Ok(pool::Args::SubmitPicks(PickSubmission {
                week_id: week,
                picks,
            }))
        }
        other => Err(unknown(other)),
    }
}

fn results(matches: &ArgMatches) -> Result<pool::Args> {
    match subcommand(matches)? {
        (pool_cmd::CMD_WEEK, sub_m) => Ok(pool::Args::WeekResults {
            week: required(sub_m, pool_cmd::ARG_WEEK)?,
        }),
        (pool_cmd::CMD_SEASON, _) => Ok(pool::Args::Season),
        (other, _) => Err(unknown(other)),
    }
}

fn survivor(matches: &ArgMatches) -> Result<pool::Args> {
    match subcommand(matches)? {
        (pool_cmd::CMD_STANDINGS, _) => Ok(pool::Args::SurvivorStandings),
        (pool_cmd::CMD_PICKS, _) => Ok(pool::Args::SurvivorPicks),
        (pool_cmd::CMD_PICK, sub_m) => Ok(pool::Args::SurvivorPick(SurvivorPickRequest {
            week_id: required(sub_m, pool_cmd::ARG_WEEK)?,
            team: required(sub_m, pool_cmd::ARG_TEAM)?,
        })),
        (other, _) => Err(unknown(other)),
    }
}

fn game_input(matches: &ArgMatches) -> Result<GameInput> {
    Ok(GameInput {
        week_id: required(matches, pool_cmd::ARG_WEEK)?,
        home_team: required(matches, admin_cmd::ARG_HOME)?,
        away_team: required(matches, admin_cmd::ARG_AWAY)?,
        spread: required(matches, admin_cmd::ARG_SPREAD)?,
        kickoff: required(matches, admin_cmd::ARG_KICKOFF)?,
    })
}

fn week_input(matches: &ArgMatches) -> Result<WeekInput> {
    Ok(WeekInput {
        season: required(matches, admin_cmd::ARG_SEASON)?,
        number: required(matches, admin_cmd::ARG_NUMBER)?,
        picks_lock_at: optional_string(matches, admin_cmd::ARG_LOCK_AT),
        is_active: matches.get_flag(admin_cmd::ARG_ACTIVE),
    })
}

fn role(matches: &ArgMatches) -> Option<Role> {
    matches
        .get_one::<String>(admin_cmd::ARG_ROLE)
        .map(|role| match role.as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        })
}

fn admin_action(matches: &ArgMatches) -> Result<admin::Args> {
    let (area, area_m) = subcommand(matches)?;
    let (verb, sub_m) = subcommand(area_m)?;
    let id = || required::<i64>(sub_m, admin_cmd::ARG_ID);

    match (area, verb) {
        (admin_cmd::CMD_GAMES, pool_cmd::CMD_LIST) => Ok(admin::Args::ListGames {
            week: sub_m.get_one::<i64>(pool_cmd::ARG_WEEK).copied(),
        }),
        (admin_cmd::CMD_GAMES, admin_cmd::CMD_CREATE) => Ok(admin::Args::CreateGame(game_input(sub_m)?)),
        (admin_cmd::CMD_GAMES, admin_cmd::CMD_UPDATE) => Ok(admin::Args::UpdateGame {
            id: id()?,
            input: game_input(sub_m)?,
        }),
        (admin_cmd::CMD_GAMES, admin_cmd::CMD_SCORE) => Ok(admin::Args::ScoreGame {
            id: id()?,
            score: ScoreInput {
                home_score: required(sub_m, admin_cmd::ARG_HOME_SCORE)?,
                away_score: required(sub_m, admin_cmd::ARG_AWAY_SCORE)?,
            },
        }),
        (admin_cmd::CMD_GAMES, admin_cmd::CMD_DELETE) => Ok(admin::Args::DeleteGame { id: id()? }),
        (admin_cmd::CMD_WEEKS, pool_cmd::CMD_LIST) => Ok(admin::Args::ListWeeks),
        (admin_cmd::CMD_WEEKS, admin_cmd::CMD_CREATE) => Ok(admin::Args::CreateWeek(week_input(sub_m)?)),
        (admin_cmd::CMD_WEEKS, admin_cmd::CMD_UPDATE) => Ok(admin::Args::UpdateWeek {
            id: id()?,
            input: week_input(sub_m)?,
        }),
        (admin_cmd::CMD_WEEKS, admin_cmd::CMD_DELETE) => Ok(admin::Args::DeleteWeek { id: id()? }),
        (admin_cmd::CMD_USERS, pool_cmd::CMD_LIST) => Ok(admin::Args::ListUsers),
        (admin_cmd::CMD_USERS, admin_cmd::CMD_UPDATE) => Ok(admin::Args::UpdateUser {
            id: id()?,
            update: UserUpdate {
                name: optional_string(sub_m, admin_cmd::ARG_NAME),
                email: optional_string(sub_m, admin_cmd::ARG_EMAIL),
                role: role(sub_m),
            },
        }),
        (admin_cmd::CMD_USERS, admin_cmd::CMD_DELETE) => Ok(admin::Args::DeleteUser { id: id()? }),
        (admin_cmd::CMD_PICKS, pool_cmd::CMD_LIST) => Ok(admin::Args::ListPicks {
            week: sub_m.get_one::<i64>(pool_cmd::ARG_WEEK).copied(),
        }),
        (admin_cmd::CMD_PICKS, admin_cmd::CMD_UPDATE) => Ok(admin::Args::UpdatePick {
            id: id()?,
            update: PickUpdate {
                team: required(sub_m, admin_cmd::ARG_TEAM)?,
            },
        }),
        (admin_cmd::CMD_PICKS, admin_cmd::CMD_DELETE) => Ok(admin::Args::DeletePick { id: id()? }),
        (area, verb) => Err(unknown(&format!("{area} {verb}"))),
    }
}
