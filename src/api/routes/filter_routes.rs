use axum::{routing::get, Router};
use crate::api::controller::filter::FilterController;
use crate::app_state::AppState;

pub fn filter_routes() -> Router<AppState> {
    Router::new()
        .route("/filters", get(FilterController::catalog))
        .route("/filters/{resource}", get(FilterController::allowed_fields))
        .route("/filters/{resource}/{field}", get(FilterController::check_field))
}

pub fn time_filter_routes() -> Router<AppState> {
    Router::new().route("/time-filters/{selection}", get(FilterController::resolve_time_filter))
}
