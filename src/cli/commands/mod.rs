pub mod admin;
pub mod auth;
pub mod client;
pub mod logging;
pub mod pool;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("gridpool")
        .about("Football pool picks, standings and administration")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(auth::subcommands())
        .subcommands(pool::subcommands())
        .subcommand(admin::subcommand());

    let command = client::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::types::PickSelection;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "gridpool");
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        temp_env::with_vars([("GRIDPOOL_API_URL", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "gridpool",
                "games",
                "--week",
                "3",
                "--api-url",
                "https://pool.example.com",
                "--timeout",
                "30",
                "--json",
            ]);

            assert_eq!(
                matches.get_one::<String>(client::ARG_API_URL).cloned(),
                Some("https://pool.example.com".to_string())
            );
            assert_eq!(matches.get_one::<u64>(client::ARG_TIMEOUT).copied(), Some(30));
            assert!(matches.get_flag(client::ARG_JSON));

            let (name, sub) = matches.subcommand().expect("subcommand");
            assert_eq!(name, pool::CMD_GAMES);
            assert_eq!(sub.get_one::<i64>(pool::ARG_WEEK).copied(), Some(3));
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GRIDPOOL_API_URL", Some("https://pool.example.com")),
                ("GRIDPOOL_SESSION_FILE", Some("/tmp/gridpool-session.json")),
                ("GRIDPOOL_TIMEOUT", Some("5")),
                ("GRIDPOOL_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["gridpool", "weeks"]);
                assert_eq!(
                    matches.get_one::<String>(client::ARG_API_URL).cloned(),
                    Some("https://pool.example.com".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(client::ARG_SESSION_FILE).cloned(),
                    Some("/tmp/gridpool-session.json".to_string())
                );
                assert_eq!(matches.get_one::<u64>(client::ARG_TIMEOUT).copied(), Some(5));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("GRIDPOOL_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["gridpool", "weeks"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap_or(u8::MAX))
                );
            });
        }
    }

    #[test]
    fn test_verbosity_flags() {
        temp_env::with_vars([("GRIDPOOL_LOG_LEVEL", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["gridpool", "-vvv", "weeks"]);
            assert_eq!(
                matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                Some(3)
            );
        });
    }

    #[test]
    fn test_submit_picks_collects_each_pick() {
        let matches = new().get_matches_from(vec![
            "gridpool", "picks", "submit", "--week", "2", "--pick", "10=Bears", "-p", "11=Lions",
        ]);
        let (_, picks) = matches.subcommand().expect("picks");
        let (name, submit) = picks.subcommand().expect("submit");
        assert_eq!(name, pool::CMD_SUBMIT);

        let selections: Vec<PickSelection> = submit
            .get_many::<PickSelection>(pool::ARG_PICK)
            .expect("picks")
            .cloned()
            .collect();
        assert_eq!(selections.len(), 2);
        assert_eq!(selections[1].team, "Lions");
    }

    #[test]
    fn test_rejects_malformed_pick() {
        let result = new().try_get_matches_from(vec![
            "gridpool", "picks", "submit", "--week", "2", "--pick", "Bears",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_game_accepts_negative_spread() {
        let matches = new().get_matches_from(vec![
            "gridpool",
            "admin",
            "games",
            "create",
            "--week",
            "1",
            "--home",
            "Bears",
            "--away",
            "Packers",
            "--spread",
            "-3.5",
            "--kickoff",
            "2026-09-13T17:00:00Z",
        ]);
        let (_, admin) = matches.subcommand().expect("admin");
        let (_, games) = admin.subcommand().expect("games");
        let (_, create) = games.subcommand().expect("create");
        assert_eq!(create.get_one::<f64>(admin::ARG_SPREAD).copied(), Some(-3.5));
    }

    #[test]
    fn test_profile_needs_a_field() {
        let result = new().try_get_matches_from(vec!["gridpool", "profile"]);
        assert!(result.is_err());
    }
}
