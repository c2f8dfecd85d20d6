//! Data controller: one-shot record pages and blob downloads

use axum::extract::{Path, Query, State};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use validator::Validate;

use crate::api::dto::view_dto::{parse_time_filter, DataPageQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::data::dto::{DataRecord, Page};
use crate::errors::AppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub struct DataController;

impl DataController {
    pub async fn get_data_page(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
        Query(query): Query<DataPageQuery>,
    ) -> Result<Json<ApiResponse<Page<DataRecord>>>, AppError> {
        query.validate()?;
        let time_filter = parse_time_filter(query.time_filter.as_deref())?.unwrap_or_default();
        to_json(
            state
                .dashboard
                .fetch_data_page(&namespace, time_filter, query.page, query.page_size)
                .await,
        )
    }

    pub async fn download_blob(
        State(state): State<AppState>,
        Path((namespace, data_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let download = state.dashboard.fetch_blob(&namespace, &data_id).await?;

        let content_type = download
            .payload
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let disposition = format!(
            "attachment; filename=\"{}\"",
            download.filename.replace(['"', '\\', '\r', '\n'], "_")
        );

        Ok((
            [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
            download.payload.bytes,
        )
            .into_response())
    }
}
