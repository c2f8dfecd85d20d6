//! Fields each resource list accepts in its query string.

use serde::Serialize;

use super::resource_type::ResourceType;

const API_FIELDS: &[&str] = &["id", "name", "interface"];

const APPROVAL_FIELDS: &[&str] = &[
    "localid",
    "pool",
    "connector",
    "namespace",
    "key",
    "operator",
    "approved",
    "protocolid",
    "subject",
    "active",
    "created",
    "tx.type",
    "tx.id",
    "blockchainevent",
];

const BALANCE_FIELDS: &[&str] = &[
    "pool",
    "tokenindex",
    "uri",
    "connector",
    "namespace",
    "key",
    "balance",
    "updated",
];

const BATCH_FIELDS: &[&str] = &[
    "id",
    "namespace",
    "type",
    "author",
    "key",
    "group",
    "hash",
    "payloadref",
    "created",
    "confirmed",
    "tx.type",
    "tx.id",
    "node",
];

const BLOCKCHAIN_EVENT_FIELDS: &[&str] = &[
    "id",
    "source",
    "namespace",
    "name",
    "protocolid",
    "listener",
    "tx.type",
    "tx.id",
    "tx.blockchainid",
    "timestamp",
];

const INTERFACE_FIELDS: &[&str] = &["id", "name", "namespace", "version"];

const DATA_FIELDS: &[&str] = &[
    "id",
    "namespace",
    "validator",
    "datatype.name",
    "datatype.version",
    "hash",
    "blob.hash",
    "blob.public",
    "blob.name",
    "blob.size",
    "created",
    "value",
];

const DATATYPE_FIELDS: &[&str] = &[
    "id",
    "message",
    "namespace",
    "validator",
    "name",
    "version",
    "created",
];

const EVENT_FIELDS: &[&str] = &[
    "id",
    "type",
    "namespace",
    "reference",
    "correlator",
    "tx",
    "topic",
    "sequence",
    "created",
];

const GROUP_FIELDS: &[&str] = &[
    "hash",
    "message",
    "namespace",
    "description",
    "ledger",
    "created",
];

const IDENTITY_FIELDS: &[&str] = &[
    "id",
    "did",
    "parent",
    "messages.claim",
    "messages.verification",
    "messages.update",
    "type",
    "namespace",
    "name",
    "description",
    "profile",
    "created",
    "updated",
];

const LISTENER_FIELDS: &[&str] = &[
    "id",
    "interface",
    "namespace",
    "location",
    "topic",
    "signature",
    "backendid",
    "created",
];

const MESSAGE_FIELDS: &[&str] = &[
    "id",
    "cid",
    "namespace",
    "type",
    "author",
    "key",
    "topics",
    "tag",
    "group",
    "created",
    "hash",
    "pins",
    "state",
    "confirmed",
    "sequence",
    "txtype",
    "batch",
];

const NAMESPACE_FIELDS: &[&str] = &[
    "id",
    "message",
    "type",
    "name",
    "description",
    "created",
    "confirmed",
];

const OPERATION_FIELDS: &[&str] = &[
    "id",
    "tx",
    "type",
    "namespace",
    "status",
    "error",
    "plugin",
    "input",
    "output",
    "created",
    "updated",
    "retry",
];

const POOL_FIELDS: &[&str] = &[
    "id",
    "type",
    "namespace",
    "name",
    "standard",
    "locator",
    "symbol",
    "decimals",
    "message",
    "state",
    "created",
    "connector",
    "tx.type",
    "tx.id",
];

const SUBSCRIPTION_FIELDS: &[&str] = &[
    "id",
    "namespace",
    "name",
    "transport",
    "events",
    "filters",
    "options",
    "created",
];

const TRANSACTION_FIELDS: &[&str] = &["id", "type", "created", "blockchainids", "namespace"];

const TRANSFER_FIELDS: &[&str] = &[
    "localid",
    "pool",
    "tokenindex",
    "uri",
    "connector",
    "namespace",
    "key",
    "from",
    "to",
    "amount",
    "protocolid",
    "message",
    "messagehash",
    "created",
    "tx.type",
    "tx.id",
    "blockchainevent",
    "type",
];

pub fn allowed_fields(resource: ResourceType) -> &'static [&'static str] {
    match resource {
        ResourceType::Apis => API_FIELDS,
        ResourceType::Approvals => APPROVAL_FIELDS,
        ResourceType::Balances => BALANCE_FIELDS,
        ResourceType::Batches => BATCH_FIELDS,
        ResourceType::BlockchainEvents => BLOCKCHAIN_EVENT_FIELDS,
        ResourceType::Data => DATA_FIELDS,
        ResourceType::Datatypes => DATATYPE_FIELDS,
        ResourceType::Events => EVENT_FIELDS,
        ResourceType::Groups => GROUP_FIELDS,
        ResourceType::Identities => IDENTITY_FIELDS,
        ResourceType::Interfaces => INTERFACE_FIELDS,
        ResourceType::Listeners => LISTENER_FIELDS,
        ResourceType::Messages => MESSAGE_FIELDS,
        ResourceType::Namespaces => NAMESPACE_FIELDS,
        ResourceType::Operations => OPERATION_FIELDS,
        ResourceType::Pools => POOL_FIELDS,
        ResourceType::Subscriptions => SUBSCRIPTION_FIELDS,
        ResourceType::Transactions => TRANSACTION_FIELDS,
        ResourceType::Transfers => TRANSFER_FIELDS,
    }
}

pub fn is_allowed(resource: ResourceType, field: &str) -> bool {
    allowed_fields(resource).contains(&field)
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterCatalogEntry {
    pub resource: ResourceType,
    pub path: &'static str,
    pub fields: &'static [&'static str],
}

impl FilterCatalogEntry {
    pub fn for_resource(resource: ResourceType) -> Self {
        Self {
            resource,
            path: resource.collection_path(),
            fields: allowed_fields(resource),
        }
    }
}

pub fn catalog() -> Vec<FilterCatalogEntry> {
    ResourceType::ALL
        .iter()
        .copied()
        .map(FilterCatalogEntry::for_resource)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_resource_has_a_non_empty_unique_field_list() {
        for r in ResourceType::ALL {
            let fields = allowed_fields(r);
            assert!(!fields.is_empty(), "{} has no fields", r);
            let unique: HashSet<_> = fields.iter().collect();
            assert_eq!(unique.len(), fields.len(), "{} has duplicate fields", r);
        }
    }

    #[test]
    fn created_is_queryable_on_time_filtered_resources() {
        for r in [
            ResourceType::Messages,
            ResourceType::Transactions,
            ResourceType::Operations,
            ResourceType::Events,
            ResourceType::Data,
        ] {
            assert!(is_allowed(r, "created"), "{} must accept created", r);
        }
        assert!(!is_allowed(ResourceType::Apis, "created"));
    }

    #[test]
    fn membership_follows_declared_order() {
        assert_eq!(allowed_fields(ResourceType::Transactions)[0], "id");
        assert!(is_allowed(ResourceType::Messages, "state"));
        assert!(is_allowed(ResourceType::Operations, "status"));
        assert!(!is_allowed(ResourceType::Messages, "status"));
    }

    #[test]
    fn catalog_covers_all_resources() {
        let entries = catalog();
        assert_eq!(entries.len(), ResourceType::ALL.len());
        assert_eq!(entries[0].resource, ResourceType::Apis);
    }
}
