//! Wire shapes returned by the backend REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// `{ total }` from a count-only request; `items` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CountResponse {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: u64,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub timestamp: DateTime<Utc>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<HistogramTypeCount>,
    #[serde(default)]
    pub is_capped: bool,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramTypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub count: u64,
}

/// Newest-event probe used by the live event watcher.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSummary {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct BlobPayload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
