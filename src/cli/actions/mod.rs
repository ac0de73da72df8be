pub mod admin;
pub mod pool;
pub mod render;
pub mod session;

// Internal "interpreter" for `Action`. The match lives in `run` so this module
// only describes what can be asked for.
mod run;

use crate::{cli::globals::GlobalArgs, guards::Access};

#[derive(Debug)]
pub enum Action {
    Session(session::Args),
    Pool(pool::Args),
    Admin(admin::Args),
}

impl Action {
    /// Who may run the action. Checked through the route guards before any
    /// request is made.
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Session(args) => args.access(),
            Self::Pool(_) => Access::Authenticated,
            Self::Admin(_) => Access::Admin,
        }
    }

    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
