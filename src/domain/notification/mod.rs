//! Sink for user-visible, non-blocking fetch failure notices

use async_trait::async_trait;

use crate::core::client::fetch_error::FetchError;

#[async_trait]
pub trait FetchErrorReporter: Send + Sync {
    /// Record one rejected backend request. Must not fail.
    async fn report_fetch_error(&self, error: &FetchError);
}
