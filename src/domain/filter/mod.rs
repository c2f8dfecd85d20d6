//! Query filters: created-time windows and per-resource field lists

pub mod filter_catalog;
pub mod resource_type;
pub mod time_window;
