//! View routes (e.g., /api/v1/views/*)

use axum::{routing::{get, post, put}, Router};
use crate::api::controller::view::ViewController;
use crate::app_state::AppState;

pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/views", get(ViewController::list_views))
        .route(
            "/views/{namespace}",
            get(ViewController::get_view)
                .post(ViewController::mount)
                .delete(ViewController::unmount),
        )
        .route("/views/{namespace}/time-filter", put(ViewController::set_time_filter))
        .route("/views/{namespace}/page", put(ViewController::set_page))
        .route("/views/{namespace}/refresh", post(ViewController::refresh))
}
