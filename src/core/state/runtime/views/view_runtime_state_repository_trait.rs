use std::sync::Arc;
use async_trait::async_trait;

use crate::core::state::runtime::views::view_runtime_state::ViewRuntimeState;

#[async_trait]
pub trait ViewRuntimeStateRepositoryTrait: Send + Sync {
    /// Return the current state as an Arc snapshot.
    async fn get(&self) -> Arc<ViewRuntimeState>;

    /// Mutate a copy of the state and swap it in, returning the closure's result.
    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut ViewRuntimeState) -> T + Send,
        T: Send;
}
