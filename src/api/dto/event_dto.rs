use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /events/notify`. Without a namespace every view refreshes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NotifyEventRequest {
    #[validate(length(min = 1))]
    pub namespace: Option<String>,
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotifyEventResponse {
    pub sequence: u64,
    pub subscribers: usize,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct NotificationQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}
