use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::core::client::fetch_error::FetchError;
use crate::core::state::runtime::notifications::notification_runtime_state::{
    Notification, NotificationRuntimeState,
};
use crate::domain::notification::FetchErrorReporter;

#[derive(Default)]
pub struct NotificationRuntimeStateManager {
    state: RwLock<NotificationRuntimeState>,
}

impl NotificationRuntimeStateManager {
    /// Oldest notifications are dropped past this many.
    const MAX_NOTIFICATIONS: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub async fn recent(&self, limit: usize) -> Vec<Notification> {
        self.state.read().await.recent(limit)
    }

    pub async fn clear(&self) {
        *self.state.write().await = NotificationRuntimeState::default();
    }
}

#[async_trait]
impl FetchErrorReporter for NotificationRuntimeStateManager {
    async fn report_fetch_error(&self, error: &FetchError) {
        warn!(url = %error.url(), error = %error, "backend fetch failed");

        let notification = Notification {
            id: Uuid::new_v4(),
            message: error.to_string(),
            url: error.url().to_string(),
            created_at: Utc::now(),
        };
        self.state
            .write()
            .await
            .push(notification, Self::MAX_NOTIFICATIONS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(i: usize) -> FetchError {
        FetchError::Transport {
            url: format!("/api/v1/namespaces/ns{}/messages", i),
            message: "connection refused".into(),
        }
    }

    #[tokio::test]
    async fn keeps_only_the_newest_notifications() {
        let manager = NotificationRuntimeStateManager::new();
        for i in 0..105 {
            manager.report_fetch_error(&transport(i)).await;
        }
        let all = manager.recent(usize::MAX).await;
        assert_eq!(all.len(), 100);
        assert!(all[0].url.contains("ns5/"));
        assert!(all[99].url.contains("ns104/"));

        let last_two = manager.recent(2).await;
        assert_eq!(last_two.len(), 2);
        assert!(last_two[1].url.contains("ns104/"));
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let manager = NotificationRuntimeStateManager::new();
        manager.report_fetch_error(&transport(1)).await;
        manager.clear().await;
        assert!(manager.recent(10).await.is_empty());
    }
}
