pub mod view_runtime_state;
pub mod view_runtime_state_manager;
pub mod view_runtime_state_repository;
pub mod view_runtime_state_repository_trait;
