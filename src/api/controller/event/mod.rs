use axum::extract::State;
use axum::Json;
use tracing::info;
use validator::Validate;

use crate::api::dto::event_dto::{NotifyEventRequest, NotifyEventResponse};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::events::live_event_hub::LiveEventSignal;
use crate::errors::AppError;

pub struct EventController;

impl EventController {
    /// Inject a live event signal, as if the watcher had seen a new event.
    pub async fn notify(
        State(state): State<AppState>,
        Json(req): Json<NotifyEventRequest>,
    ) -> Result<Json<ApiResponse<NotifyEventResponse>>, AppError> {
        req.validate()?;
        let sequence = state.live_events.publish(req.namespace.clone(), req.event_id);
        info!(namespace = ?req.namespace, sequence, "live event injected");

        to_json(Ok(NotifyEventResponse {
            sequence,
            subscribers: state.live_events.subscriber_count(),
        }))
    }

    pub async fn latest(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<LiveEventSignal>>, AppError> {
        to_json(Ok(state.live_events.current()))
    }
}
