use clap::{Arg, ArgAction, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_REGISTER: &str = "register";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_PROFILE: &str = "profile";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";
pub const ARG_FOLLOW: &str = "follow";
pub const ARG_INTERVAL: &str = "interval";

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Account password; read from stdin when omitted")
        .env("GRIDPOOL_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_LOGIN)
            .about("Sign in and store the session")
            .arg(
                Arg::new(ARG_EMAIL)
                    .long(ARG_EMAIL)
                    .help("Account email")
                    .env("GRIDPOOL_EMAIL")
                    .required(true),
            )
            .arg(password_arg()),
        Command::new(CMD_LOGOUT).about("Sign out and forget the stored session"),
        Command::new(CMD_REGISTER)
            .about("Create an account")
            .arg(
                Arg::new(ARG_NAME)
                    .long(ARG_NAME)
                    .help("Display name")
                    .required(true),
            )
            .arg(
                Arg::new(ARG_EMAIL)
                    .long(ARG_EMAIL)
                    .help("Account email")
                    .required(true),
            )
            .arg(password_arg()),
        Command::new(CMD_WHOAMI)
            .about("Show the signed-in user")
            .arg(
                Arg::new(ARG_FOLLOW)
                    .long(ARG_FOLLOW)
                    .help("Keep checking the session until it ends")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(ARG_INTERVAL)
                    .long(ARG_INTERVAL)
                    .help("Seconds between session checks with --follow")
                    .default_value("60")
                    .value_parser(clap::value_parser!(u64).range(1..)),
            ),
        Command::new(CMD_PROFILE)
            .about("Update your display name or email")
            .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("New display name"))
            .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("New email"))
            .group(
                clap::ArgGroup::new("profile-fields")
                    .args([ARG_NAME, ARG_EMAIL])
                    .multiple(true)
                    .required(true),
            ),
    ]
}
