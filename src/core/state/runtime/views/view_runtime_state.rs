use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::client::dto::HistogramBucket;
use crate::domain::data::dto::{DataRecord, Page};
use crate::domain::filter::time_window::{resolve, CreatedFilter, TimeFilter};
use crate::domain::status::pie_chart::PieChartElement;

/// Dashboard summary counts, one per summary resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub messages: u64,
    pub transactions: u64,
    pub operations: u64,
    pub events: u64,
}

/// Histogram series for the summary resources, oldest bucket first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HistogramSet {
    pub messages: Vec<HistogramBucket>,
    pub transactions: Vec<HistogramBucket>,
    pub operations: Vec<HistogramBucket>,
    pub events: Vec<HistogramBucket>,
}

/// A displayed value that is only ever replaced whole.
///
/// `value` is `None` until the first successful round ("pending").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<T> {
    pub value: Option<T>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub applied_round: u64,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            value: None,
            updated_at: None,
            applied_round: 0,
        }
    }
}

impl<T> Section<T> {
    /// Replace the value unless a newer round already landed here.
    pub fn try_apply(&mut self, round: u64, value: T) -> bool {
        if round <= self.applied_round {
            return false;
        }
        self.value = Some(value);
        self.applied_round = round;
        self.updated_at = Some(Utc::now());
        true
    }
}

/// Everything one mounted namespace view displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceView {
    pub namespace: String,
    #[serde(skip)]
    pub epoch: u64,
    pub time_filter: TimeFilter,
    /// Window of the most recently issued round.
    pub created_filter: CreatedFilter,
    pub page_index: u64,
    pub page_size: u64,

    pub totals: Section<SummaryTotals>,
    pub message_statuses: Section<Vec<PieChartElement>>,
    pub transaction_statuses: Section<Vec<PieChartElement>>,
    pub operation_statuses: Section<Vec<PieChartElement>>,
    pub histograms: Section<HistogramSet>,
    pub data_page: Section<Page<DataRecord>>,

    pub mounted_at: DateTime<Utc>,
    #[serde(skip)]
    pub next_round: u64,
}

impl NamespaceView {
    pub fn new(
        namespace: String,
        epoch: u64,
        time_filter: TimeFilter,
        page_size: u64,
        now: i64,
    ) -> Self {
        Self {
            namespace,
            epoch,
            time_filter,
            created_filter: resolve(time_filter, now),
            page_index: 0,
            page_size,
            totals: Section::default(),
            message_statuses: Section::default(),
            transaction_statuses: Section::default(),
            operation_statuses: Section::default(),
            histograms: Section::default(),
            data_page: Section::default(),
            mounted_at: Utc::now(),
            next_round: 0,
        }
    }

    fn take_round(&mut self) -> u64 {
        self.next_round += 1;
        self.next_round
    }
}

/// Parameters captured when a round is issued. The window is resolved
/// against the clock at issue time. Results are applied against the ticket,
/// never against whatever the view shows at completion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTicket {
    pub namespace: String,
    pub epoch: u64,
    pub round: u64,
    pub created_filter: CreatedFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    pub round: RoundTicket,
    pub page_index: u64,
    pub page_size: u64,
}

/// In-memory state of every mounted view. Not persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewRuntimeState {
    pub views: HashMap<String, NamespaceView>,
    #[serde(skip)]
    pub next_epoch: u64,
}

impl ViewRuntimeState {
    /// An already mounted namespace keeps its epoch and parameters.
    pub fn mount(&mut self, namespace: &str, time_filter: TimeFilter, page_size: u64, now: i64) -> (u64, bool) {
        if let Some(existing) = self.views.get(namespace) {
            return (existing.epoch, false);
        }
        self.next_epoch += 1;
        let epoch = self.next_epoch;
        self.views.insert(
            namespace.to_string(),
            NamespaceView::new(namespace.to_string(), epoch, time_filter, page_size, now),
        );
        (epoch, true)
    }

    pub fn unmount(&mut self, namespace: &str) -> bool {
        self.views.remove(namespace).is_some()
    }

    pub fn begin_round(&mut self, namespace: &str, now: i64) -> Option<RoundTicket> {
        let view = self.views.get_mut(namespace)?;
        let round = view.take_round();
        view.created_filter = resolve(view.time_filter, now);
        Some(RoundTicket {
            namespace: namespace.to_string(),
            epoch: view.epoch,
            round,
            created_filter: view.created_filter.clone(),
        })
    }

    pub fn begin_page_fetch(&mut self, namespace: &str, now: i64) -> Option<PageTicket> {
        let round = self.begin_round(namespace, now)?;
        let view = self.views.get(namespace)?;
        Some(PageTicket {
            round,
            page_index: view.page_index,
            page_size: view.page_size,
        })
    }

    /// Change the window; the page index goes back to 0.
    pub fn set_time_filter(&mut self, namespace: &str, time_filter: TimeFilter) -> bool {
        match self.views.get_mut(namespace) {
            Some(view) => {
                view.time_filter = time_filter;
                view.page_index = 0;
                true
            }
            None => false,
        }
    }

    pub fn set_page(&mut self, namespace: &str, page_index: u64, page_size: u64) -> bool {
        match self.views.get_mut(namespace) {
            Some(view) => {
                view.page_index = page_index;
                view.page_size = page_size;
                true
            }
            None => false,
        }
    }

    /// The view a ticket was issued for, if it is still mounted.
    pub fn view_for(&mut self, ticket: &RoundTicket) -> Option<&mut NamespaceView> {
        self.views
            .get_mut(&ticket.namespace)
            .filter(|v| v.epoch == ticket.epoch)
    }
}
