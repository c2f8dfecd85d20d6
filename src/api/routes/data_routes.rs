//! Namespace data routes (e.g., /api/v1/namespaces/{ns}/data/*)

use axum::{routing::get, Router};
use crate::api::controller::data::DataController;
use crate::app_state::AppState;

pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/namespaces/{namespace}/data", get(DataController::get_data_page))
        .route("/namespaces/{namespace}/data/{data_id}/blob", get(DataController::download_blob))
}
