//! Off-chain data records and the page window over them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::core::client::dto::BlobPayload;

/// One window over a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Backend order (newest first by convention).
    pub items: Vec<T>,
    /// Matches the filter in effect when the page was fetched.
    pub total: u64,
    pub page_index: u64,
    pub page_size: u64,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: String,
    pub validator: Option<String>,
    pub namespace: Option<String>,
    pub hash: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub datatype: Option<DatatypeRef>,
    pub blob: Option<BlobRef>,
    pub value: Option<Value>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatypeRef {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    pub hash: Option<String>,
    pub size: Option<u64>,
    pub name: Option<String>,
    pub public: Option<String>,
}

impl DataRecord {
    pub fn blob_name(&self) -> Option<&str> {
        self.blob.as_ref().and_then(|b| b.name.as_deref())
    }
}

/// A blob ready to hand to a browser.
#[derive(Debug, Clone)]
pub struct BlobDownload {
    /// Blob name when the record carries one, the record id otherwise.
    pub filename: String,
    pub payload: BlobPayload,
}
