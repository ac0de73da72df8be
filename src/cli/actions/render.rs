//! Terminal output for views: plain-text tables, or pretty JSON with `--json`.

use crate::{
    pool::types::{
        Game, Pick, PickOutcome, SeasonStanding, SurvivorEntry, SurvivorPick, UserWithStats,
        Week, WeekResult,
    },
    session::UserProfile,
};
use anyhow::{Context, Result};
use comfy_table::{presets, Table};
use serde::Serialize;

/// Prints `value` as JSON or through `table`.
///
/// # Errors
/// Returns an error if the value cannot be serialized.
pub fn emit<T: Serialize + ?Sized>(json: bool, value: &T, table: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        println!("{out}");
    } else {
        print!("{}", table(value));
    }
    Ok(())
}

/// Lays out rows under `headers`; an empty table prints `(none)` below it.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let empty = rows.is_empty();
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL_CONDENSED).set_header(headers);
    for row in rows {
        table.add_row(row);
    }

    let mut out = table.to_string();
    out.push('\n');
    if empty {
        out.push_str("(none)\n");
    }
    out
}

fn outcome(outcome: Option<PickOutcome>) -> String {
    outcome.map_or_else(|| "-".to_string(), |outcome| outcome.to_string())
}

fn score(game: &Game) -> String {
    match (game.away_score, game.home_score) {
        (Some(away), Some(home)) => format!("{away}-{home}"),
        _ => "-".to_string(),
    }
}

#[must_use]
pub fn profile(user: &UserProfile) -> String {
    format!("{} <{}>\nid: {}\nrole: {}\n", user.name, user.email, user.id, user.role)
}

#[must_use]
pub fn games(games: &[Game]) -> String {
    let rows: Vec<Vec<String>> = games
        .iter()
        .map(|game| {
            vec![
                game.id.to_string(),
                game.away_team.clone(),
                format!("@ {}", game.home_team),
                format!("{:+}", game.spread),
                game.kickoff.clone(),
                score(game),
            ]
        })
        .collect();
    table(&["ID", "AWAY", "HOME", "SPREAD", "KICKOFF", "SCORE"], rows)
}

#[must_use]
pub fn weeks(weeks: &[Week]) -> String {
    let rows: Vec<Vec<String>> = weeks
        .iter()
        .map(|week| {
            vec![
                week.id.to_string(),
                week.season.to_string(),
                week.number.to_string(),
                week.picks_lock_at.clone().unwrap_or_else(|| "-".to_string()),
                if week.is_active { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    table(&["ID", "SEASON", "WEEK", "LOCKS", "ACTIVE"], rows)
}

/// Picks with their result; ungraded picks on final games are graded from
/// the matching entry in `games`.
#[must_use]
pub fn picks(picks: &[Pick], games: &[Game]) -> String {
    let rows: Vec<Vec<String>> = picks
        .iter()
        .map(|pick| {
            let result = games
                .iter()
                .find(|game| game.id == pick.game_id)
                .map_or(pick.outcome, |game| pick.outcome_against(game));
            vec![
                pick.id.to_string(),
                pick.user_id.to_string(),
                pick.game_id.to_string(),
                pick.team.clone(),
                outcome(result),
            ]
        })
        .collect();
    table(&["ID", "USER", "GAME", "TEAM", "RESULT"], rows)
}

#[must_use]
pub fn week_results(results: &[WeekResult]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|result| {
            vec![
                result.name.clone(),
                result.wins.to_string(),
                result.losses.to_string(),
                result.pushes.to_string(),
            ]
        })
        .collect();
    table(&["PLAYER", "W", "L", "P"], rows)
}

#[must_use]
pub fn standings(standings: &[SeasonStanding]) -> String {
    let rows: Vec<Vec<String>> = standings
        .iter()
        .map(|standing| {
            vec![
                standing.rank.to_string(),
                standing.name.clone(),
                standing.wins.to_string(),
                standing.losses.to_string(),
                standing.pushes.to_string(),
                format!("{:.3}", standing.win_pct()),
                standing.weeks_won.to_string(),
            ]
        })
        .collect();
    table(&["RANK", "PLAYER", "W", "L", "P", "PCT", "WEEKS WON"], rows)
}

#[must_use]
pub fn survivor_standings(entries: &[SurvivorEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let status = match (entry.alive, entry.eliminated_week) {
                (true, _) => "alive".to_string(),
                (false, Some(week)) => format!("out week {week}"),
                (false, None) => "out".to_string(),
            };
            vec![entry.name.clone(), status, entry.teams_used.join(", ")]
        })
        .collect();
    table(&["PLAYER", "STATUS", "TEAMS USED"], rows)
}

#[must_use]
pub fn survivor_picks(picks: &[SurvivorPick]) -> String {
    let rows: Vec<Vec<String>> = picks
        .iter()
        .map(|pick| vec![pick.week_id.to_string(), pick.team.clone(), outcome(pick.outcome)])
        .collect();
    table(&["WEEK", "TEAM", "RESULT"], rows)
}

#[must_use]
pub fn users(users: &[UserWithStats]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                user.role.to_string(),
                format!("{}-{}-{}", user.wins, user.losses, user.pushes),
            ]
        })
        .collect();
    table(&["ID", "NAME", "EMAIL", "ROLE", "RECORD"], rows)
}
