//! Background tasks

pub mod tasks;

use tokio::task::JoinHandle;
use tracing::info;

use crate::app_state::AppState;
use crate::scheduler::tasks::event_watch::task::LiveEventWatcher;

/// Start the process-wide background tasks. Per-view refresh loops are
/// started by the view service on mount.
pub fn spawn_background_tasks(state: &AppState) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();

    match state.config.event_poll_interval() {
        Some(period) => {
            let watcher = LiveEventWatcher::new(
                state.api.clone(),
                state.dashboard.views().clone(),
                state.live_events.clone(),
                state.notifications.clone(),
            );
            handles.push(tokio::spawn(watcher.run(period)));
        }
        None => info!("live event watcher disabled"),
    }

    handles
}
