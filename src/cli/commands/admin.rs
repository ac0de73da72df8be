use crate::cli::commands::pool::{week_arg, CMD_LIST};
use clap::{Arg, ArgAction, ArgGroup, Command};

pub const CMD_ADMIN: &str = "admin";
pub const CMD_GAMES: &str = "games";
pub const CMD_WEEKS: &str = "weeks";
pub const CMD_USERS: &str = "users";
pub const CMD_PICKS: &str = "picks";

pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";
pub const CMD_SCORE: &str = "score";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_HOME: &str = "home";
pub const ARG_AWAY: &str = "away";
pub const ARG_SPREAD: &str = "spread";
pub const ARG_KICKOFF: &str = "kickoff";
pub const ARG_HOME_SCORE: &str = "home-score";
pub const ARG_AWAY_SCORE: &str = "away-score";
pub const ARG_SEASON: &str = "season";
pub const ARG_NUMBER: &str = "number";
pub const ARG_LOCK_AT: &str = "lock-at";
pub const ARG_ACTIVE: &str = "active";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_ROLE: &str = "role";
pub const ARG_TEAM: &str = "team";

fn id_arg(what: &'static str) -> Arg {
    Arg::new(ARG_ID)
        .long(ARG_ID)
        .help(what)
        .required(true)
        .value_parser(clap::value_parser!(i64).range(1..))
}

fn score_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(i32).range(0..))
}

fn game_args(command: Command) -> Command {
    command
        .arg(week_arg(true))
        .arg(Arg::new(ARG_HOME).long(ARG_HOME).help("Home team").required(true))
        .arg(Arg::new(ARG_AWAY).long(ARG_AWAY).help("Away team").required(true))
        .arg(
            Arg::new(ARG_SPREAD)
                .long(ARG_SPREAD)
                .help("Points added to the home score; negative when home is favored")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new(ARG_KICKOFF)
                .long(ARG_KICKOFF)
                .help("Kickoff time, RFC 3339")
                .required(true),
        )
}

fn week_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SEASON)
                .long(ARG_SEASON)
                .help("Season year")
                .required(true)
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            Arg::new(ARG_NUMBER)
                .long(ARG_NUMBER)
                .help("Week number within the season")
                .required(true)
                .value_parser(clap::value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new(ARG_LOCK_AT)
                .long(ARG_LOCK_AT)
                .help("When picks lock, RFC 3339"),
        )
        .arg(
            Arg::new(ARG_ACTIVE)
                .long(ARG_ACTIVE)
                .help("Mark the week as the active one")
                .action(ArgAction::SetTrue),
        )
}

fn games() -> Command {
    Command::new(CMD_GAMES)
        .about("Manage games")
        .subcommand_required(true)
        .subcommand(
            Command::new(CMD_LIST)
                .about("List games")
                .arg(week_arg(false)),
        )
        .subcommand(game_args(Command::new(CMD_CREATE).about("Add a game")))
        .subcommand(game_args(
            Command::new(CMD_UPDATE)
                .about("Replace a game's details")
                .arg(id_arg("Game id")),
        ))
        .subcommand(
            Command::new(CMD_SCORE)
                .about("Record the final score")
                .arg(id_arg("Game id"))
                .arg(score_arg(ARG_HOME_SCORE, "Home team points"))
                .arg(score_arg(ARG_AWAY_SCORE, "Away team points")),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a game")
                .arg(id_arg("Game id")),
        )
}

fn weeks() -> Command {
    Command::new(CMD_WEEKS)
        .about("Manage weeks")
        .subcommand_required(true)
        .subcommand(Command::new(CMD_LIST).about("List weeks"))
        .subcommand(week_args(Command::new(CMD_CREATE).about("Add a week")))
        .subcommand(week_args(
            Command::new(CMD_UPDATE)
                .about("Replace a week's details")
                .arg(id_arg("Week id")),
        ))
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a week")
                .arg(id_arg("Week id")),
        )
}

fn users() -> Command {
    Command::new(CMD_USERS)
        .about("Manage users")
        .subcommand_required(true)
        .subcommand(Command::new(CMD_LIST).about("List users with their records"))
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Change a user's name, email or role")
                .arg(id_arg("User id"))
                .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Display name"))
                .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("Email"))
                .arg(
                    Arg::new(ARG_ROLE)
                        .long(ARG_ROLE)
                        .help("Role")
                        .value_parser(["user", "admin"]),
                )
                .group(
                    ArgGroup::new("user-fields")
                        .args([ARG_NAME, ARG_EMAIL, ARG_ROLE])
                        .multiple(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a user")
                .arg(id_arg("User id")),
        )
}

fn picks() -> Command {
    Command::new(CMD_PICKS)
        .about("Manage picks")
        .subcommand_required(true)
        .subcommand(
            Command::new(CMD_LIST)
                .about("List picks")
                .arg(week_arg(false)),
        )
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Change the team on a pick")
                .arg(id_arg("Pick id"))
                .arg(Arg::new(ARG_TEAM).long(ARG_TEAM).help("Team").required(true)),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a pick")
                .arg(id_arg("Pick id")),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_ADMIN)
        .about("Administer games, weeks, users and picks")
        .subcommand_required(true)
        .subcommand(games())
        .subcommand(weeks())
        .subcommand(users())
        .subcommand(picks())
}
