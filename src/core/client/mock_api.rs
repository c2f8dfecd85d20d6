//! In-memory `FireflyApi` for tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::client::dto::BlobPayload;
use crate::core::client::fetch_error::FetchError;
use crate::core::client::firefly_client::FireflyApi;
use crate::core::client::paths::{count_path, histogram_path};
use crate::domain::filter::resource_type::ResourceType;
use crate::domain::filter::time_window::CreatedFilter;
use crate::domain::status::{MessageStatus, OperationStatus, StatusKind, TransactionStatus};

/// Answers by exact path; unknown paths get a 404 status error.
#[derive(Default)]
pub struct MockFireflyApi {
    responses: Mutex<HashMap<String, Result<Value, FetchError>>>,
    blobs: Mutex<HashMap<String, BlobPayload>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<String>>,
}

impl MockFireflyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: impl Into<String>, value: Value) -> &Self {
        self.responses.lock().unwrap().insert(path.into(), Ok(value));
        self
    }

    pub fn fail(&self, path: impl Into<String>) -> &Self {
        let path = path.into();
        let err = FetchError::Transport {
            url: path.clone(),
            message: "connection reset".into(),
        };
        self.responses.lock().unwrap().insert(path, Err(err));
        self
    }

    pub fn delay(&self, path: impl Into<String>, by: Duration) -> &Self {
        self.delays.lock().unwrap().insert(path.into(), by);
        self
    }

    pub fn blob(&self, path: impl Into<String>, payload: BlobPayload) -> &Self {
        self.blobs.lock().unwrap().insert(path.into(), payload);
        self
    }

    /// Answer every request of a dashboard round with zero counts and empty
    /// histograms over `[start, end]`.
    pub fn seed_round(&self, namespace: &str, created: &CreatedFilter, start: i64, end: i64) -> &Self {
        let zero = serde_json::json!({ "total": 0 });
        for resource in ResourceType::SUMMARY {
            self.respond(count_path(namespace, resource, created, None), zero.clone());
            self.respond(histogram_path(namespace, resource, start, end), serde_json::json!([]));
        }
        self.seed_statuses::<MessageStatus>(namespace, ResourceType::Messages, created);
        self.seed_statuses::<TransactionStatus>(namespace, ResourceType::Transactions, created);
        self.seed_statuses::<OperationStatus>(namespace, ResourceType::Operations, created);
        self
    }

    fn seed_statuses<S: StatusKind>(&self, namespace: &str, resource: ResourceType, created: &CreatedFilter) {
        for status in S::ALL {
            self.respond(
                count_path(namespace, resource, created, Some((S::QUERY_KEY, status.code()))),
                serde_json::json!({ "total": 0 }),
            );
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    async fn before(&self, path: &str) {
        self.requests.lock().unwrap().push(path.to_string());
        let delay = self.delays.lock().unwrap().get(path).copied();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    fn not_found(path: &str) -> FetchError {
        FetchError::Status {
            url: path.to_string(),
            status: 404,
            body: "not found".into(),
        }
    }
}

#[async_trait]
impl FireflyApi for MockFireflyApi {
    async fn get_value(&self, path: &str) -> Result<Value, FetchError> {
        self.before(path).await;
        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(Self::not_found(path)))
    }

    async fn get_blob(&self, path: &str) -> Result<BlobPayload, FetchError> {
        self.before(path).await;
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }
}
