use crate::{
    api::ClientConfig,
    cli::commands::client::{ARG_API_URL, ARG_JSON, ARG_SESSION_FILE, ARG_TIMEOUT},
    session::FileSessionStore,
};
use anyhow::{Context, Result};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
    pub timeout: Duration,
    pub json: bool,
}

impl GlobalArgs {
    /// # Errors
    /// Returns an error if the API URL is missing or invalid, or if no session
    /// file location can be determined.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url (or GRIDPOOL_API_URL)")?;
        Url::parse(&api_url).with_context(|| format!("invalid API URL: {api_url}"))?;

        let session_file = match matches.get_one::<String>(ARG_SESSION_FILE) {
            Some(path) => PathBuf::from(path),
            None => FileSessionStore::default_path()
                .context("no config directory; pass --session-file")?,
        };

        let timeout = Duration::from_secs(matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10));

        Ok(Self {
            api_url,
            session_file,
            timeout,
            json: matches.get_flag(ARG_JSON),
        })
    }

    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout)
    }
}
