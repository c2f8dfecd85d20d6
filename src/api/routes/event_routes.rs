use axum::{routing::{get, post}, Router};
use crate::api::controller::event::EventController;
use crate::api::controller::notification::NotificationController;
use crate::app_state::AppState;

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events/notify", post(EventController::notify))
        .route("/events/latest", get(EventController::latest))
}

pub fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications",
        get(NotificationController::list).delete(NotificationController::clear),
    )
}
