use crate::pool::types::PickSelection;
use clap::{Arg, ArgAction, Command};

pub const CMD_GAMES: &str = "games";
pub const CMD_WEEKS: &str = "weeks";
pub const CMD_PICKS: &str = "picks";
pub const CMD_RESULTS: &str = "results";
pub const CMD_SURVIVOR: &str = "survivor";

pub const CMD_LIST: &str = "list";
pub const CMD_SUBMIT: &str = "submit";
pub const CMD_WEEK: &str = "week";
pub const CMD_SEASON: &str = "season";
pub const CMD_STANDINGS: &str = "standings";
pub const CMD_PICK: &str = "pick";

pub const ARG_WEEK: &str = "week";
pub const ARG_PICK: &str = "pick";
pub const ARG_TEAM: &str = "team";

/// Parses `GAME_ID=TEAM`.
///
/// # Errors
/// Returns an error if the value is not `GAME_ID=TEAM` with a numeric id and a
/// non-empty team.
pub fn parse_pick(value: &str) -> Result<PickSelection, String> {
    let (game, team) = value
        .split_once('=')
        .ok_or_else(|| format!("expected GAME_ID=TEAM, got {value:?}"))?;
    let game_id = game
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid game id {game:?}"))?;
    let team = team.trim();
    if team.is_empty() {
        return Err(format!("missing team for game {game_id}"));
    }
    Ok(PickSelection {
        game_id,
        team: team.to_string(),
    })
}

pub(crate) fn week_arg(required: bool) -> Arg {
    Arg::new(ARG_WEEK)
        .long(ARG_WEEK)
        .short('w')
        .help("Week id")
        .required(required)
        .value_parser(clap::value_parser!(i64).range(1..))
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_GAMES)
            .about("List games and spreads")
            .arg(week_arg(false)),
        Command::new(CMD_WEEKS).about("List the season's weeks"),
        Command::new(CMD_PICKS)
            .about("View or submit your weekly picks")
            .subcommand_required(true)
            .subcommand(
                Command::new(CMD_LIST)
                    .about("List your picks for a week")
                    .arg(week_arg(true)),
            )
            .subcommand(
                Command::new(CMD_SUBMIT)
                    .about("Submit picks for a week")
                    .arg(week_arg(true))
                    .arg(
                        Arg::new(ARG_PICK)
                            .long(ARG_PICK)
                            .short('p')
                            .help("Pick as GAME_ID=TEAM; repeat for each game")
                            .required(true)
                            .action(ArgAction::Append)
                            .value_parser(parse_pick),
                    ),
            ),
        Command::new(CMD_RESULTS)
            .about("Weekly results and season standings")
            .subcommand_required(true)
            .subcommand(
                Command::new(CMD_WEEK)
                    .about("Results for one week")
                    .arg(week_arg(true)),
            )
            .subcommand(Command::new(CMD_SEASON).about("Season standings")),
        Command::new(CMD_SURVIVOR)
            .about("Survivor pool")
            .subcommand_required(true)
            .subcommand(Command::new(CMD_STANDINGS).about("Who is still alive"))
            .subcommand(Command::new(CMD_PICKS).about("Your survivor picks so far"))
            .subcommand(
                Command::new(CMD_PICK)
                    .about("Make this week's survivor pick")
                    .arg(week_arg(true))
                    .arg(
                        Arg::new(ARG_TEAM)
                            .long(ARG_TEAM)
                            .short('t')
                            .help("Team to survive the week")
                            .required(true),
                    ),
            ),
    ]
}
