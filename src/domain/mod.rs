pub mod dashboard;
pub mod data;
pub mod events;
pub mod filter;
pub mod notification;
pub mod status;
