//! Closed status sets shown as dashboard pie charts

pub mod pie_chart;

use serde::{Deserialize, Serialize};

const COLOR_DONE: &str = "#462DE0";
const COLOR_IN_FLIGHT: &str = "#FFCA00";
const COLOR_FAILED: &str = "#FF0000";

/// A closed status enumeration the backend can count by.
pub trait StatusKind: Copy + Eq + Send + Sync + 'static {
    /// Every value, in declaration (legend) order.
    const ALL: &'static [Self];

    /// Query key the backend filters this status on (`state` or `status`).
    const QUERY_KEY: &'static str;

    fn code(&self) -> &'static str;

    fn color(&self) -> &'static str;

    fn label(&self) -> &'static str {
        self.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Confirmed,
    Ready,
    Pending,
    Staged,
    Rejected,
}

impl StatusKind for MessageStatus {
    const ALL: &'static [Self] = &[
        MessageStatus::Confirmed,
        MessageStatus::Ready,
        MessageStatus::Pending,
        MessageStatus::Staged,
        MessageStatus::Rejected,
    ];
    const QUERY_KEY: &'static str = "state";

    fn code(&self) -> &'static str {
        match self {
            MessageStatus::Confirmed => "confirmed",
            MessageStatus::Ready => "ready",
            MessageStatus::Pending => "pending",
            MessageStatus::Staged => "staged",
            MessageStatus::Rejected => "rejected",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            MessageStatus::Confirmed => COLOR_DONE,
            MessageStatus::Ready | MessageStatus::Pending | MessageStatus::Staged => COLOR_IN_FLIGHT,
            MessageStatus::Rejected => COLOR_FAILED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Succeeded,
    Pending,
    Error,
}

impl StatusKind for TransactionStatus {
    const ALL: &'static [Self] = &[
        TransactionStatus::Succeeded,
        TransactionStatus::Pending,
        TransactionStatus::Error,
    ];
    const QUERY_KEY: &'static str = "status";

    fn code(&self) -> &'static str {
        match self {
            TransactionStatus::Succeeded => "Succeeded",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Error => "Error",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            TransactionStatus::Succeeded => COLOR_DONE,
            TransactionStatus::Pending => COLOR_IN_FLIGHT,
            TransactionStatus::Error => COLOR_FAILED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    Succeeded,
    Pending,
    Failed,
}

impl StatusKind for OperationStatus {
    const ALL: &'static [Self] = &[
        OperationStatus::Succeeded,
        OperationStatus::Pending,
        OperationStatus::Failed,
    ];
    const QUERY_KEY: &'static str = "status";

    fn code(&self) -> &'static str {
        match self {
            OperationStatus::Succeeded => "Succeeded",
            OperationStatus::Pending => "Pending",
            OperationStatus::Failed => "Failed",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            OperationStatus::Succeeded => COLOR_DONE,
            OperationStatus::Pending => COLOR_IN_FLIGHT,
            OperationStatus::Failed => COLOR_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_cardinality() {
        assert_eq!(MessageStatus::ALL.len(), 5);
        assert_eq!(TransactionStatus::ALL.len(), 3);
        assert_eq!(OperationStatus::ALL.len(), 3);
    }

    #[test]
    fn query_keys_match_backend() {
        assert_eq!(MessageStatus::QUERY_KEY, "state");
        assert_eq!(TransactionStatus::QUERY_KEY, "status");
        assert_eq!(OperationStatus::QUERY_KEY, "status");
    }
}
