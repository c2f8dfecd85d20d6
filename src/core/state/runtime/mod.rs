pub mod notifications;
pub mod views;
