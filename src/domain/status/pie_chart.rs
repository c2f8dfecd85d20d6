use serde::{Deserialize, Serialize};

use super::StatusKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartElement {
    pub id: String,
    pub label: String,
    pub value: u64,
    pub color: String,
}

/// Project per-status counts onto the fixed legend of `S`.
///
/// Output follows `S::ALL` order regardless of input order; statuses absent
/// from `counts` are reported as zero.
pub fn map_pie_chart_data<S: StatusKind>(counts: &[(S, u64)]) -> Vec<PieChartElement> {
    S::ALL
        .iter()
        .map(|status| {
            let value = counts
                .iter()
                .filter(|(s, _)| s == status)
                .map(|(_, v)| *v)
                .sum();
            PieChartElement {
                id: status.code().to_string(),
                label: status.label().to_string(),
                value,
                color: status.color().to_string(),
            }
        })
        .collect()
}
