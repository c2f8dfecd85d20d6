//! Backend URL construction. Paths are relative to the backend base URL.

use crate::domain::filter::resource_type::ResourceType;
use crate::domain::filter::time_window::CreatedFilter;

pub const API_PREFIX: &str = "/api/v1";
pub const HISTOGRAM_BUCKETS: u32 = 40;

pub fn namespace_prefix(namespace: &str) -> String {
    format!("{}/namespaces/{}", API_PREFIX, urlencoding::encode(namespace))
}

pub fn collection_path(namespace: &str, resource: ResourceType) -> String {
    if resource.is_namespaced() {
        format!("{}/{}", namespace_prefix(namespace), resource.collection_path())
    } else {
        format!("{}/{}", API_PREFIX, resource.collection_path())
    }
}

/// Count-only query: `?count<created filter>&limit=1[&key=value]`.
pub fn count_path(
    namespace: &str,
    resource: ResourceType,
    created: &CreatedFilter,
    status: Option<(&str, &str)>,
) -> String {
    let mut path = format!(
        "{}?count{}&limit=1",
        collection_path(namespace, resource),
        created.filter_string
    );
    if let Some((key, value)) = status {
        path.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
    }
    path
}

/// One page with its total: `?limit=N&count&skip=M<created filter>`.
pub fn page_path(
    namespace: &str,
    resource: ResourceType,
    created: &CreatedFilter,
    page_index: u64,
    page_size: u64,
) -> String {
    format!(
        "{}?limit={}&count&skip={}{}",
        collection_path(namespace, resource),
        page_size,
        page_size.saturating_mul(page_index),
        created.filter_string
    )
}

pub fn histogram_path(namespace: &str, resource: ResourceType, start: i64, end: i64) -> String {
    format!(
        "{}/charts/histogram/{}?startTime={}&endTime={}&buckets={}",
        namespace_prefix(namespace),
        resource.as_code(),
        start,
        end,
        HISTOGRAM_BUCKETS
    )
}

pub fn latest_event_path(namespace: &str) -> String {
    format!("{}?limit=1", collection_path(namespace, ResourceType::Events))
}

pub fn record_path(namespace: &str, resource: ResourceType, id: &str) -> String {
    format!(
        "{}/{}",
        collection_path(namespace, resource),
        urlencoding::encode(id)
    )
}

pub fn blob_path(namespace: &str, data_id: &str) -> String {
    format!("{}/blob", record_path(namespace, ResourceType::Data, data_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::time_window::{resolve, TimeFilter};

    #[test]
    fn count_path_appends_filter_and_status() {
        let created = resolve(TimeFilter::OneHour, 7_200);
        assert_eq!(
            count_path("default", ResourceType::Transactions, &created, Some(("status", "Pending"))),
            "/api/v1/namespaces/default/transactions?count&created=>=3600&limit=1&status=Pending"
        );
        assert_eq!(
            count_path("default", ResourceType::Messages, &CreatedFilter::unbounded(), None),
            "/api/v1/namespaces/default/messages?count&limit=1"
        );
    }

    #[test]
    fn page_path_skips_whole_pages() {
        let path = page_path("ns1", ResourceType::Data, &CreatedFilter::unbounded(), 2, 25);
        assert_eq!(path, "/api/v1/namespaces/ns1/data?limit=25&count&skip=50");
    }

    #[test]
    fn histogram_path_carries_bounds_and_bucket_count() {
        assert_eq!(
            histogram_path("default", ResourceType::Messages, 1_700_013_600, 1_700_100_000),
            "/api/v1/namespaces/default/charts/histogram/messages?startTime=1700013600&endTime=1700100000&buckets=40"
        );
    }

    #[test]
    fn namespace_and_ids_are_encoded() {
        assert_eq!(namespace_prefix("a b"), "/api/v1/namespaces/a%20b");
        assert_eq!(blob_path("ns", "x/y"), "/api/v1/namespaces/ns/data/x%2Fy/blob");
        assert_eq!(
            collection_path("ignored", ResourceType::Namespaces),
            "/api/v1/namespaces"
        );
    }
}
