use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::event_dto::NotificationQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::state::runtime::notifications::notification_runtime_state::Notification;
use crate::errors::AppError;

const DEFAULT_LIMIT: usize = 100;

pub struct NotificationController;

impl NotificationController {
    pub async fn list(
        State(state): State<AppState>,
        Query(query): Query<NotificationQuery>,
    ) -> Result<Json<ApiResponse<Vec<Notification>>>, AppError> {
        query.validate()?;
        to_json(Ok(state
            .notifications
            .recent(query.limit.unwrap_or(DEFAULT_LIMIT))
            .await))
    }

    pub async fn clear(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        state.notifications.clear().await;
        to_json(Ok(json!({ "cleared": true })))
    }
}
