use crate::{
    api::{ApiClient, ApiError},
    boundary::{Boundary, Rendered},
    cli::{
        actions::{admin, pool, session, Action},
        globals::GlobalArgs,
    },
    guards::{self, Access, Guard},
    session::{AuthBridge, FileSessionStore},
};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds the client and bridge from the stored session. A held token with no
/// profile snapshot is checked against the server before any guard runs.
async fn connect(globals: &GlobalArgs) -> Result<AuthBridge> {
    let store = Arc::new(FileSessionStore::new(globals.session_file.clone()));
    let client = ApiClient::new(&globals.client_config(), store).context("failed to build API client")?;
    client.initialize().await;

    let bridge = AuthBridge::new(client);
    if bridge.has_session() && !bridge.is_authenticated() {
        if let Err(err) = bridge.hydrate().await {
            warn!("could not restore session: {err}");
        }
    }
    Ok(bridge)
}

fn guard(bridge: &AuthBridge, access: Access) -> Result<()> {
    let decision = guards::check(&bridge.state(), access);
    match (decision, decision.message()) {
        (Guard::MustLogIn, Some(message)) => Err(anyhow!("{message} Run `gridpool login` first.")),
        (_, Some(message)) => Err(anyhow!("{message}")),
        (_, None) => Ok(()),
    }
}

async fn dispatch(action: Action, bridge: &AuthBridge, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Session(args) => session::execute(args, bridge, globals).await,
        Action::Pool(args) => pool::execute(args, bridge.client(), globals).await,
        Action::Admin(args) => admin::execute(args, bridge.client(), globals).await,
    }
}

/// Execute the provided action.
// This is the single dispatch point for all CLI actions. Every action runs
// behind its guard and inside a boundary.
/// # Errors
/// Returns an error if the guard denies the action or the action fails.
pub async fn execute(action: Action, globals: GlobalArgs) -> Result<()> {
    let bridge = connect(&globals).await?;

    let access = action.access();
    guard(&bridge, access)?;
    debug!(?access, "guard passed");

    let view_bridge = bridge.clone();
    let mut boundary = Boundary::new();
    let rendered = boundary
        .supervise(async move {
            let result = dispatch(action, &view_bridge, &globals).await;
            match result {
                Err(err) if access != Access::Public => {
                    let redirect = err
                        .downcast_ref::<ApiError>()
                        .and_then(|api_err| view_bridge.observe(api_err));
                    match redirect {
                        Some(redirect) => {
                            info!(to = redirect.to, "session ended by server");
                            Err(anyhow!("{err}. Session ended; run `gridpool login` to sign in again."))
                        }
                        None => Err(err),
                    }
                }
                other => other,
            }
        })
        .await;

    match (rendered, boundary.failure()) {
        (Rendered::View(()), _) => Ok(()),
        (Rendered::Fallback, Some(message)) => Err(anyhow!("{message}")),
        (Rendered::Fallback, None) => Err(anyhow!("view failed")),
    }
}
