//! Request and response records for the pool endpoints.

use crate::session::types::Role;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickOutcome {
    Win,
    Loss,
    Push,
}

impl fmt::Display for PickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Push => write!(f, "push"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub week_id: i64,
    pub home_team: String,
    pub away_team: String,
    /// Points added to the home team's score; negative when home is favored.
    pub spread: f64,
    pub kickoff: String,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub status: GameStatus,
}

impl Game {
    /// Which side `team` plays on, if it plays in this game at all.
    #[must_use]
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team.eq_ignore_ascii_case(team) {
            Some(Side::Home)
        } else if self.away_team.eq_ignore_ascii_case(team) {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Grades a pick against the spread once the game is final. The picked
    /// side's score plus its share of the spread is compared with the
    /// opponent's score; a tie is a push.
    #[must_use]
    pub fn grade(&self, side: Side) -> Option<PickOutcome> {
        if self.status != GameStatus::Final {
            return None;
        }
        let home = f64::from(self.home_score?);
        let away = f64::from(self.away_score?);

        let (adjusted, opponent) = match side {
            Side::Home => (home + self.spread, away),
            Side::Away => (away - self.spread, home),
        };

        Some(match adjusted.partial_cmp(&opponent) {
            Some(Ordering::Greater) => PickOutcome::Win,
            Some(Ordering::Less) => PickOutcome::Loss,
            _ => PickOutcome::Push,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub id: i64,
    pub season: i32,
    pub number: i32,
    #[serde(default)]
    pub picks_lock_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub week_id: i64,
    pub team: String,
    #[serde(default)]
    pub outcome: Option<PickOutcome>,
}

impl Pick {
    /// The server's grade when it has one, otherwise the grade computed from
    /// `game`'s final score. `None` for a different game or one not yet final.
    #[must_use]
    pub fn outcome_against(&self, game: &Game) -> Option<PickOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        if game.id != self.game_id {
            return None;
        }
        game.side_of(&self.team).and_then(|side| game.grade(side))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickSelection {
    pub game_id: i64,
    pub team: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickSubmission {
    pub week_id: i64,
    pub picks: Vec<PickSelection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPicksResponse {
    pub saved: usize,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// One player's record for a single week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub user_id: i64,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub pushes: u32,
}

/// One row of the season table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonStanding {
    pub rank: u32,
    pub user_id: i64,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub pushes: u32,
    #[serde(default)]
    pub weeks_won: u32,
}

impl SeasonStanding {
    /// Share of decided picks won; pushes are excluded.
    #[must_use]
    pub fn win_pct(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorEntry {
    pub user_id: i64,
    pub name: String,
    pub alive: bool,
    #[serde(default)]
    pub eliminated_week: Option<i32>,
    #[serde(default)]
    pub teams_used: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorPick {
    pub week_id: i64,
    pub team: String,
    #[serde(default)]
    pub outcome: Option<PickOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorPickRequest {
    pub week_id: i64,
    pub team: String,
}

/// Profile fields a user may change. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Admin view of a user with season totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithStats {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub pushes: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInput {
    pub week_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub spread: f64,
    pub kickoff: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInput {
    pub season: i32,
    pub number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picks_lock_at: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickUpdate {
    pub team: String,
}
