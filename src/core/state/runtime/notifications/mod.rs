pub mod notification_runtime_state;
pub mod notification_runtime_state_manager;
