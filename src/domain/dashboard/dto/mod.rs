use serde::Serialize;

use crate::core::client::fetch_error::FetchError;
use crate::core::state::runtime::views::view_runtime_state::{HistogramSet, SummaryTotals};
use crate::domain::status::pie_chart::PieChartElement;

/// A section's batch: every value, or every failure that sank it.
pub type Batch<T> = Result<T, Vec<FetchError>>;

/// Everything one refresh round fetched, section by section.
#[derive(Debug)]
pub struct RoundResults {
    pub totals: Batch<SummaryTotals>,
    pub message_statuses: Batch<Vec<PieChartElement>>,
    pub transaction_statuses: Batch<Vec<PieChartElement>>,
    pub operation_statuses: Batch<Vec<PieChartElement>>,
    pub histograms: Batch<HistogramSet>,
}

impl RoundResults {
    pub fn errors(&self) -> impl Iterator<Item = &FetchError> {
        [
            self.totals.as_ref().err(),
            self.message_statuses.as_ref().err(),
            self.transaction_statuses.as_ref().err(),
            self.operation_statuses.as_ref().err(),
            self.histograms.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .flatten()
    }
}

/// What a refresh round or page fetch did to the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    pub round: u64,
    /// Sections replaced by this round.
    pub applied: Vec<&'static str>,
    /// Sections whose batch failed.
    pub failed: Vec<&'static str>,
    /// Sections that succeeded but were superseded by a newer round or unmount.
    pub stale: Vec<&'static str>,
    pub errors: usize,
}

impl RefreshOutcome {
    pub fn new(round: u64) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, section: &'static str, applied: bool) {
        if applied {
            self.applied.push(section);
        } else {
            self.stale.push(section);
        }
    }

    pub(crate) fn fail(&mut self, section: &'static str, errors: usize) {
        self.failed.push(section);
        self.errors += errors;
    }

    pub fn merge(&mut self, other: RefreshOutcome) {
        self.round = self.round.max(other.round);
        self.applied.extend(other.applied);
        self.failed.extend(other.failed);
        self.stale.extend(other.stale);
        self.errors += other.errors;
    }
}
