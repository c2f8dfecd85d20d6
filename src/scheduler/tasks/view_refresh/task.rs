use std::sync::Weak;

use tracing::{debug, warn};

use crate::domain::dashboard::service::dashboard_view_service::DashboardViewService;
use crate::domain::events::live_event_hub::LiveEventSubscription;

/// Refresh one mounted view whenever a live event concerning it arrives.
///
/// Ends when the view is unmounted, the service is dropped or the hub goes
/// away. The subscription is released with the task.
pub async fn run_view_refresh_loop(
    service: Weak<DashboardViewService>,
    namespace: String,
    mut subscription: LiveEventSubscription,
) {
    while let Some(signal) = subscription.next().await {
        if !signal.concerns(&namespace) {
            continue;
        }
        let Some(service) = service.upgrade() else {
            break;
        };

        debug!(namespace = %namespace, sequence = signal.sequence, "live event, refreshing view");
        let (round, page) = tokio::join!(
            service.refresh(&namespace),
            service.fetch_current_page(&namespace)
        );
        if let Err(err) = round.and(page) {
            warn!(namespace = %namespace, error = %err, "stopping refresh loop");
            break;
        }
    }
    debug!(namespace = %namespace, "refresh loop finished");
}
