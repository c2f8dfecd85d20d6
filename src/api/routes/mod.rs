//! API route declarations (e.g., /api/v1/*)

pub mod data_routes;
pub mod event_routes;
pub mod filter_routes;
pub mod view_routes;
