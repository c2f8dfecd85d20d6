//! View controller: mounted namespace views and their refresh rounds

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::view_dto::{parse_time_filter, MountViewQuery, PageRequest, TimeFilterRequest};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::state::runtime::views::view_runtime_state::NamespaceView;
use crate::domain::dashboard::dto::RefreshOutcome;
use crate::errors::AppError;

pub struct ViewController;

impl ViewController {
    pub async fn list_views(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
        to_json(Ok(state.dashboard.mounted_namespaces().await))
    }

    pub async fn mount(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
        Query(query): Query<MountViewQuery>,
    ) -> Result<Json<ApiResponse<NamespaceView>>, AppError> {
        query.validate()?;
        let time_filter = parse_time_filter(query.time_filter.as_deref())?;
        to_json(state.dashboard.mount(&namespace, time_filter, query.page_size).await)
    }

    pub async fn unmount(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(
            state
                .dashboard
                .unmount(&namespace)
                .await
                .map(|_| json!({ "namespace": namespace, "mounted": false })),
        )
    }

    pub async fn get_view(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
    ) -> Result<Json<ApiResponse<NamespaceView>>, AppError> {
        to_json(state.dashboard.snapshot(&namespace).await)
    }

    pub async fn set_time_filter(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
        Json(req): Json<TimeFilterRequest>,
    ) -> Result<Json<ApiResponse<NamespaceView>>, AppError> {
        req.validate()?;
        let time_filter = req.time_filter.parse()?;
        to_json(state.dashboard.set_time_filter(&namespace, time_filter).await)
    }

    pub async fn set_page(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
        Json(req): Json<PageRequest>,
    ) -> Result<Json<ApiResponse<NamespaceView>>, AppError> {
        req.validate()?;
        to_json(
            state
                .dashboard
                .set_page(&namespace, req.page_index, req.page_size)
                .await,
        )
    }

    /// Manual refresh: one round plus the current page.
    pub async fn refresh(
        State(state): State<AppState>,
        Path(namespace): Path<String>,
    ) -> Result<Json<ApiResponse<RefreshOutcome>>, AppError> {
        let (round, page) = tokio::join!(
            state.dashboard.refresh(&namespace),
            state.dashboard.fetch_current_page(&namespace)
        );
        to_json(round.and_then(|mut outcome| {
            outcome.merge(page?);
            Ok(outcome)
        }))
    }
}
