use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::state::runtime::views::view_runtime_state::ViewRuntimeState;
use crate::core::state::runtime::views::view_runtime_state_repository_trait::ViewRuntimeStateRepositoryTrait;

#[derive(Default)]
pub struct ViewRuntimeStateRepository {
    state: Arc<RwLock<Arc<ViewRuntimeState>>>,
}

impl ViewRuntimeStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl ViewRuntimeStateRepositoryTrait for ViewRuntimeStateRepository {
    async fn get(&self) -> Arc<ViewRuntimeState> {
        self.state.read().await.clone()
    }

    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut ViewRuntimeState) -> T + Send,
        T: Send,
    {
        let mut guard = self.state.write().await;

        // Readers holding the old Arc never observe a half-applied change.
        let mut new_state = (**guard).clone();
        let out = f(&mut new_state);
        *guard = Arc::new(new_state);

        out
    }
}
