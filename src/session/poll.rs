//! Background session check against `/api/users/me`.
//!
//! The poller is independent of login and logout: it is neither stopped by a
//! logout nor restarted by a login, and keeps ticking until its handle is
//! aborted. Ticks with no session held make no request.

use crate::{guards::Redirect, session::bridge::AuthBridge};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Duration, MissedTickBehavior},
};
use tracing::{debug, warn};

/// Default interval between session checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns the poller. A `401` ends the session through the bridge and sends
/// the login redirect on `tx`; other failures are logged and ignored.
pub fn spawn(
    bridge: AuthBridge,
    interval: Duration,
    tx: mpsc::UnboundedSender<Redirect>,
) -> JoinHandle<()> {
    // tokio rejects a zero period
    let interval = interval.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately; the session was just checked
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match bridge.hydrate().await {
                Ok(Some(user)) => debug!(user_id = user.id, "session still valid"),
                Ok(None) => debug!("no session held; skipping check"),
                Err(err) if err.is_unauthorized() => {
                    if tx.send(Redirect::login()).is_err() {
                        debug!("redirect receiver dropped");
                    }
                }
                Err(err) => warn!("session check failed: {err}"),
            }
        }
    })
}
