//! Paged record fetching and blob download

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::client::dto::{BlobPayload, PagedResponse};
use crate::core::client::fetch_error::{decode_value, FetchError};
use crate::core::client::firefly_client::FireflyApi;
use crate::core::client::paths::{blob_path, page_path, record_path};
use crate::domain::data::dto::{BlobDownload, DataRecord, Page};
use crate::domain::filter::resource_type::ResourceType;
use crate::domain::filter::time_window::CreatedFilter;

/// Page sizes offered by the record tables.
pub const PAGE_SIZE_OPTIONS: [u64; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub struct PagedRecordFetcher {
    api: Arc<dyn FireflyApi>,
}

impl PagedRecordFetcher {
    pub fn new(api: Arc<dyn FireflyApi>) -> Self {
        Self { api }
    }

    /// One page of `resource` plus the total matching `created`.
    ///
    /// The returned page echoes the requested index and size. A backend that
    /// answers with more than `page_size` items is cut back to the size.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        namespace: &str,
        resource: ResourceType,
        created: &CreatedFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<Page<T>, FetchError> {
        let page_size = page_size.max(1);
        let path = page_path(namespace, resource, created, page_index, page_size);

        let value = self.api.get_value(&path).await?;
        let PagedResponse { mut items, total } = decode_value::<PagedResponse<T>>(&path, value)?;

        if items.len() as u64 > page_size {
            warn!(
                path = %path,
                returned = items.len(),
                page_size,
                "backend returned more items than requested; truncating"
            );
            items.truncate(page_size as usize);
        }

        Ok(Page {
            items,
            total,
            page_index,
            page_size,
        })
    }

    pub async fn fetch_data_page(
        &self,
        namespace: &str,
        created: &CreatedFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<Page<DataRecord>, FetchError> {
        self.fetch_page(namespace, ResourceType::Data, created, page_index, page_size)
            .await
    }

    pub async fn fetch_record(&self, namespace: &str, data_id: &str) -> Result<DataRecord, FetchError> {
        let path = record_path(namespace, ResourceType::Data, data_id);
        let value = self.api.get_value(&path).await?;
        decode_value(&path, value)
    }

    pub async fn fetch_blob(&self, namespace: &str, data_id: &str) -> Result<BlobPayload, FetchError> {
        self.api.get_blob(&blob_path(namespace, data_id)).await
    }

    /// The blob together with the name to download it as.
    pub async fn fetch_blob_download(&self, namespace: &str, data_id: &str) -> Result<BlobDownload, FetchError> {
        let (record, payload) = tokio::try_join!(
            self.fetch_record(namespace, data_id),
            self.fetch_blob(namespace, data_id)
        )?;
        let filename = record.blob_name().unwrap_or(data_id).to_string();
        Ok(BlobDownload { filename, payload })
    }
}
