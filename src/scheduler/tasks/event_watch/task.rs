use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::client::dto::EventSummary;
use crate::core::client::fetch_error::{decode_value, FetchError};
use crate::core::client::firefly_client::FireflyApi;
use crate::core::client::paths::latest_event_path;
use crate::domain::dashboard::service::dashboard_view_service::ViewManager;
use crate::domain::events::live_event_hub::LiveEventHub;
use crate::domain::notification::FetchErrorReporter;

/// `events?limit=1` answers with a bare array, or `{items}` when counted.
#[derive(Deserialize)]
#[serde(untagged)]
enum LatestEvents {
    Bare(Vec<EventSummary>),
    Paged { items: Vec<EventSummary> },
}

impl LatestEvents {
    fn newest(self) -> Option<EventSummary> {
        match self {
            LatestEvents::Bare(items) | LatestEvents::Paged { items } => items.into_iter().next(),
        }
    }
}

/// Publishes a live event signal whenever the newest event of a mounted
/// namespace changes.
pub struct LiveEventWatcher {
    api: Arc<dyn FireflyApi>,
    views: Arc<ViewManager>,
    hub: Arc<LiveEventHub>,
    reporter: Arc<dyn FetchErrorReporter>,
    /// Newest event id per namespace, `None` while the namespace has no events.
    last_seen: HashMap<String, Option<String>>,
}

impl LiveEventWatcher {
    pub fn new(
        api: Arc<dyn FireflyApi>,
        views: Arc<ViewManager>,
        hub: Arc<LiveEventHub>,
        reporter: Arc<dyn FetchErrorReporter>,
    ) -> Self {
        Self {
            api,
            views,
            hub,
            reporter,
            last_seen: HashMap::new(),
        }
    }

    pub async fn run(mut self, period: Duration) {
        info!(period_secs = period.as_secs(), "live event watcher started");
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Probe every mounted namespace once; returns the number of signals published.
    ///
    /// The first probe of a namespace only records a baseline.
    pub async fn poll_once(&mut self) -> usize {
        let mounted = self.views.mounted_namespaces().await;
        self.last_seen.retain(|ns, _| mounted.contains(ns));

        let mut published = 0;
        for namespace in mounted {
            let newest = match self.newest_event_id(&namespace).await {
                Ok(id) => id,
                Err(err) => {
                    self.reporter.report_fetch_error(&err).await;
                    continue;
                }
            };

            match self.last_seen.insert(namespace.clone(), newest.clone()) {
                Some(previous) if previous != newest => {
                    let sequence = self.hub.publish(Some(namespace.clone()), newest);
                    debug!(namespace = %namespace, sequence, "new event observed");
                    published += 1;
                }
                _ => {}
            }
        }
        published
    }

    async fn newest_event_id(&self, namespace: &str) -> Result<Option<String>, FetchError> {
        let path = latest_event_path(namespace);
        let value = self.api.get_value(&path).await?;
        let latest: LatestEvents = decode_value(&path, value)?;
        Ok(latest.newest().map(|e| e.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::mock_api::MockFireflyApi;
    use crate::core::state::runtime::notifications::notification_runtime_state_manager::NotificationRuntimeStateManager;
    use crate::core::state::runtime::views::view_runtime_state_manager::ViewRuntimeStateManager;
    use crate::core::state::runtime::views::view_runtime_state_repository::ViewRuntimeStateRepository;
    use crate::domain::filter::time_window::TimeFilter;
    use serde_json::json;

    const EVENTS: &str = "/api/v1/namespaces/default/events?limit=1";

    async fn watcher(api: Arc<MockFireflyApi>) -> (LiveEventWatcher, Arc<LiveEventHub>, Arc<NotificationRuntimeStateManager>) {
        let views = Arc::new(ViewRuntimeStateManager::new(ViewRuntimeStateRepository::new().shared()));
        views
            .mount("default", TimeFilter::None, 10, 1_700_100_000)
            .await;
        let hub = Arc::new(LiveEventHub::new());
        let notifications = Arc::new(NotificationRuntimeStateManager::new());
        let watcher = LiveEventWatcher::new(api, views, hub.clone(), notifications.clone());
        (watcher, hub, notifications)
    }

    #[tokio::test]
    async fn first_probe_is_a_baseline_then_changes_publish() {
        let api = Arc::new(MockFireflyApi::new());
        api.respond(EVENTS, json!([{ "id": "evt-1", "sequence": 1 }]));
        let (mut watcher, hub, _) = watcher(api.clone()).await;

        assert_eq!(watcher.poll_once().await, 0);
        assert_eq!(watcher.poll_once().await, 0);

        api.respond(EVENTS, json!({ "items": [{ "id": "evt-2" }], "total": 2 }));
        assert_eq!(watcher.poll_once().await, 1);

        let signal = hub.current();
        assert_eq!(signal.namespace.as_deref(), Some("default"));
        assert_eq!(signal.event_id.as_deref(), Some("evt-2"));
    }

    #[tokio::test]
    async fn first_event_in_empty_namespace_publishes() {
        let api = Arc::new(MockFireflyApi::new());
        api.respond(EVENTS, json!([]));
        let (mut watcher, _, _) = watcher(api.clone()).await;
        assert_eq!(watcher.poll_once().await, 0);

        api.respond(EVENTS, json!([{ "id": "evt-1" }]));
        assert_eq!(watcher.poll_once().await, 1);
    }

    #[tokio::test]
    async fn probe_failure_is_reported_not_published() {
        let api = Arc::new(MockFireflyApi::new());
        api.fail(EVENTS);
        let (mut watcher, hub, notifications) = watcher(api).await;

        assert_eq!(watcher.poll_once().await, 0);
        assert_eq!(hub.current().sequence, 0);
        assert_eq!(notifications.recent(10).await.len(), 1);
    }
}
