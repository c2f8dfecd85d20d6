pub mod data;
pub mod event;
pub mod filter;
pub mod notification;
pub mod view;
