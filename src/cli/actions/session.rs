use crate::{
    cli::{actions::render, globals::GlobalArgs},
    guards::Access,
    pool::types::ProfileUpdate,
    session::{poll, AuthBridge},
};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::{
    io::{self, IsTerminal},
    time::Duration,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::info;

#[derive(Debug)]
pub enum Args {
    Login {
        email: String,
        password: Option<SecretString>,
    },
    Logout,
    Register {
        name: String,
        email: String,
        password: Option<SecretString>,
    },
    WhoAmI {
        follow: bool,
        interval: Duration,
    },
    Profile(ProfileUpdate),
}

impl Args {
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Login { .. } | Self::Logout | Self::Register { .. } => Access::Public,
            Self::WhoAmI { .. } | Self::Profile(_) => Access::Authenticated,
        }
    }
}

fn password_from_line(line: &str) -> Result<SecretString> {
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("a password is required");
    }
    Ok(SecretString::from(password.to_string()))
}

/// Prompts on the terminal without echo, or reads one line when stdin is
/// piped.
async fn read_password() -> Result<SecretString> {
    if io::stdin().is_terminal() {
        let line = tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: "))
            .await
            .context("password prompt task failed")?
            .context("failed to read password from terminal")?;
        return password_from_line(&line);
    }

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read password from stdin")?;
    password_from_line(&line)
}

async fn password_or_prompt(password: Option<SecretString>) -> Result<SecretString> {
    match password {
        Some(password) => Ok(password),
        None => read_password().await,
    }
}

/// Execute a session action.
/// # Errors
/// Returns an error if the server rejects the request or output fails.
pub async fn execute(args: Args, bridge: &AuthBridge, globals: &GlobalArgs) -> Result<()> {
    match args {
        Args::Login { email, password } => {
            let password = password_or_prompt(password).await?;
            let user = bridge.login(&email, &password).await?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        Args::Logout => {
            let redirect = bridge.logout().await;
            info!(to = redirect.to, "logged out");
            println!("Logged out");
        }
        Args::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password).await?;
            bridge.register(&name, &email, &password).await?;
            println!("Account created for {email}; run `gridpool login` to sign in");
        }
        Args::WhoAmI { follow, interval } => {
            let user = bridge
                .current_user()
                .context("no user profile for the current session")?;
            render::emit(globals.json, &user, render::profile)?;

            if follow {
                follow_session(bridge, interval).await;
            }
        }
        Args::Profile(update) => {
            let user = bridge.update_profile(&update).await?;
            render::emit(globals.json, &user, render::profile)?;
        }
    }
    Ok(())
}

/// Runs the session poller until the server ends the session or the user
/// interrupts.
async fn follow_session(bridge: &AuthBridge, interval: Duration) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = poll::spawn(bridge.clone(), interval, tx);

    tokio::select! {
        redirect = rx.recv() => {
            if let Some(redirect) = redirect {
                info!(to = redirect.to, "session ended");
                println!("Session ended; run `gridpool login` to sign in again");
            }
        }
        _ = tokio::signal::ctrl_c() => {}
    }

    poller.abort();
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn piped_password_drops_line_ending() {
        let password = password_from_line("hunter2\r\n").expect("password");
        assert_eq!(password.expose_secret(), "hunter2");

        // inner whitespace is part of the password
        let password = password_from_line(" two words \n").expect("password");
        assert_eq!(password.expose_secret(), " two words ");
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(password_from_line("\n").is_err());
        assert!(password_from_line("").is_err());
    }

    #[tokio::test]
    async fn explicit_password_skips_prompt() {
        let password = password_or_prompt(Some(SecretString::from("s3cret")))
            .await
            .expect("password");
        assert_eq!(password.expose_secret(), "s3cret");
    }
}
