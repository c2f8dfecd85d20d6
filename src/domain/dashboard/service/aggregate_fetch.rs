//! Fan-out of the dashboard's count, breakdown and histogram requests

use std::sync::Arc;

use crate::core::client::dto::{CountResponse, HistogramBucket};
use crate::core::client::fetch_error::{decode_value, FetchError};
use crate::core::client::firefly_client::FireflyApi;
use crate::core::client::paths::{count_path, histogram_path};
use crate::core::state::runtime::views::view_runtime_state::{HistogramSet, SummaryTotals};
use crate::core::util::join::join_all_or_fail;
use crate::domain::dashboard::dto::{Batch, RoundResults};
use crate::domain::filter::resource_type::ResourceType;
use crate::domain::filter::time_window::CreatedFilter;
use crate::domain::status::pie_chart::{map_pie_chart_data, PieChartElement};
use crate::domain::status::{MessageStatus, OperationStatus, StatusKind, TransactionStatus};

pub struct AggregateFetchOrchestrator {
    api: Arc<dyn FireflyApi>,
    histogram_lookback_secs: i64,
}

impl AggregateFetchOrchestrator {
    pub fn new(api: Arc<dyn FireflyApi>, histogram_lookback_secs: i64) -> Self {
        Self {
            api,
            histogram_lookback_secs,
        }
    }

    /// Run one round for `(namespace, created)`.
    ///
    /// Sections are fetched concurrently and fail independently; inside a
    /// section any failed request discards the whole section.
    pub async fn fetch_round(&self, namespace: &str, created: &CreatedFilter, now: i64) -> RoundResults {
        let (totals, message_statuses, transaction_statuses, operation_statuses, histograms) = tokio::join!(
            self.fetch_totals(namespace, created),
            self.fetch_status_breakdown::<MessageStatus>(namespace, ResourceType::Messages, created),
            self.fetch_status_breakdown::<TransactionStatus>(namespace, ResourceType::Transactions, created),
            self.fetch_status_breakdown::<OperationStatus>(namespace, ResourceType::Operations, created),
            self.fetch_histograms(namespace, created, now),
        );

        RoundResults {
            totals,
            message_statuses,
            transaction_statuses,
            operation_statuses,
            histograms,
        }
    }

    pub async fn fetch_totals(&self, namespace: &str, created: &CreatedFilter) -> Batch<SummaryTotals> {
        let counts = join_all_or_fail(
            ResourceType::SUMMARY
                .iter()
                .map(|resource| self.count(count_path(namespace, *resource, created, None))),
        )
        .await?;

        // Same order as ResourceType::SUMMARY.
        let mut counts = counts.into_iter();
        let mut next = || counts.next().unwrap_or_default();
        Ok(SummaryTotals {
            messages: next(),
            transactions: next(),
            operations: next(),
            events: next(),
        })
    }

    /// One count per value of `S`, projected onto the legend of `S`.
    pub async fn fetch_status_breakdown<S: StatusKind>(
        &self,
        namespace: &str,
        resource: ResourceType,
        created: &CreatedFilter,
    ) -> Batch<Vec<PieChartElement>> {
        let counts = join_all_or_fail(S::ALL.iter().map(|status| async move {
            let path = count_path(namespace, resource, created, Some((S::QUERY_KEY, status.code())));
            self.count(path).await.map(|total| (*status, total))
        }))
        .await?;

        Ok(map_pie_chart_data(&counts))
    }

    /// Lower bound of the histogram range. Unbounded windows look back a fixed span.
    pub fn histogram_start(&self, created: &CreatedFilter, now: i64) -> i64 {
        created
            .filter_time
            .unwrap_or(now - self.histogram_lookback_secs)
    }

    pub async fn fetch_histograms(&self, namespace: &str, created: &CreatedFilter, now: i64) -> Batch<HistogramSet> {
        let start = self.histogram_start(created, now);
        let series = join_all_or_fail(
            ResourceType::SUMMARY
                .iter()
                .map(|resource| self.histogram(histogram_path(namespace, *resource, start, now))),
        )
        .await?;

        let mut series = series.into_iter();
        let mut next = || series.next().unwrap_or_default();
        Ok(HistogramSet {
            messages: next(),
            transactions: next(),
            operations: next(),
            events: next(),
        })
    }

    async fn count(&self, path: String) -> Result<u64, FetchError> {
        let value = self.api.get_value(&path).await?;
        decode_value::<CountResponse>(&path, value).map(|c| c.total)
    }

    async fn histogram(&self, path: String) -> Result<Vec<HistogramBucket>, FetchError> {
        let value = self.api.get_value(&path).await?;
        let mut buckets: Vec<HistogramBucket> = decode_value(&path, value)?;
        buckets.sort_by_key(|b| b.timestamp);
        Ok(buckets)
    }
}
