use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Queryable record kinds of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Apis,
    Approvals,
    Balances,
    Batches,
    BlockchainEvents,
    Data,
    Datatypes,
    Events,
    Groups,
    Identities,
    Interfaces,
    Listeners,
    Messages,
    Namespaces,
    Operations,
    Pools,
    Subscriptions,
    Transactions,
    Transfers,
}

impl ResourceType {
    pub const ALL: [ResourceType; 19] = [
        ResourceType::Apis,
        ResourceType::Approvals,
        ResourceType::Balances,
        ResourceType::Batches,
        ResourceType::BlockchainEvents,
        ResourceType::Data,
        ResourceType::Datatypes,
        ResourceType::Events,
        ResourceType::Groups,
        ResourceType::Identities,
        ResourceType::Interfaces,
        ResourceType::Listeners,
        ResourceType::Messages,
        ResourceType::Namespaces,
        ResourceType::Operations,
        ResourceType::Pools,
        ResourceType::Subscriptions,
        ResourceType::Transactions,
        ResourceType::Transfers,
    ];

    /// Resources summarised on the dashboard, in panel order.
    pub const SUMMARY: [ResourceType; 4] = [
        ResourceType::Messages,
        ResourceType::Transactions,
        ResourceType::Operations,
        ResourceType::Events,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            ResourceType::Apis => "apis",
            ResourceType::Approvals => "approvals",
            ResourceType::Balances => "balances",
            ResourceType::Batches => "batches",
            ResourceType::BlockchainEvents => "blockchainevents",
            ResourceType::Data => "data",
            ResourceType::Datatypes => "datatypes",
            ResourceType::Events => "events",
            ResourceType::Groups => "groups",
            ResourceType::Identities => "identities",
            ResourceType::Interfaces => "interfaces",
            ResourceType::Listeners => "listeners",
            ResourceType::Messages => "messages",
            ResourceType::Namespaces => "namespaces",
            ResourceType::Operations => "operations",
            ResourceType::Pools => "pools",
            ResourceType::Subscriptions => "subscriptions",
            ResourceType::Transactions => "transactions",
            ResourceType::Transfers => "transfers",
        }
    }

    /// Collection path below `/api/v1/namespaces/{ns}` (or below `/api/v1`
    /// for the namespace list itself).
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceType::Approvals => "tokens/approvals",
            ResourceType::Balances => "tokens/balances",
            ResourceType::Pools => "tokens/pools",
            ResourceType::Transfers => "tokens/transfers",
            ResourceType::Interfaces => "contracts/interfaces",
            ResourceType::Listeners => "contracts/listeners",
            other => other.as_code(),
        }
    }

    pub fn is_namespaced(&self) -> bool {
        !matches!(self, ResourceType::Namespaces)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .iter()
            .copied()
            .find(|r| r.as_code() == s)
            .ok_or_else(|| AppError::NotFound(format!("unknown resource type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for r in ResourceType::ALL {
            assert_eq!(r.as_code().parse::<ResourceType>().unwrap(), r);
        }
        assert!("widgets".parse::<ResourceType>().is_err());
    }

    #[test]
    fn token_and_contract_resources_live_under_subpaths() {
        assert_eq!(ResourceType::Pools.collection_path(), "tokens/pools");
        assert_eq!(ResourceType::Listeners.collection_path(), "contracts/listeners");
        assert_eq!(ResourceType::Messages.collection_path(), "messages");
        assert!(!ResourceType::Namespaces.is_namespaced());
    }
}
