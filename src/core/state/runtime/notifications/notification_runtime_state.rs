use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Most recent notifications, newest last.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationRuntimeState {
    pub notifications: VecDeque<Notification>,
}

impl NotificationRuntimeState {
    pub fn push(&mut self, notification: Notification, max_len: usize) {
        self.notifications.push_back(notification);
        while self.notifications.len() > max_len {
            self.notifications.pop_front();
        }
    }

    pub fn recent(&self, limit: usize) -> Vec<Notification> {
        let skip = self.notifications.len().saturating_sub(limit);
        self.notifications.iter().skip(skip).cloned().collect()
    }
}
