pub mod aggregate_fetch;
pub mod dashboard_view_service;
