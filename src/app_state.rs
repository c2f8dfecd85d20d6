use std::sync::Arc;

use anyhow::Result;

use crate::core::client::firefly_client::{FireflyApi, HttpFireflyClient};
use crate::core::config::AppConfig;
use crate::core::state::runtime::notifications::notification_runtime_state_manager::NotificationRuntimeStateManager;
use crate::core::state::runtime::views::view_runtime_state_manager::ViewRuntimeStateManager;
use crate::core::state::runtime::views::view_runtime_state_repository::ViewRuntimeStateRepository;
use crate::domain::dashboard::service::aggregate_fetch::AggregateFetchOrchestrator;
use crate::domain::dashboard::service::dashboard_view_service::DashboardViewService;
use crate::domain::data::service::PagedRecordFetcher;
use crate::domain::events::live_event_hub::LiveEventHub;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn FireflyApi>,
    pub dashboard: Arc<DashboardViewService>,
    pub notifications: Arc<NotificationRuntimeStateManager>,
    pub live_events: Arc<LiveEventHub>,
}

pub fn build_app_state(config: AppConfig) -> Result<AppState> {
    let api: Arc<dyn FireflyApi> = Arc::new(HttpFireflyClient::from_config(&config)?);
    Ok(build_app_state_with_api(config, api))
}

/// Wire every service around an already built backend client.
pub fn build_app_state_with_api(config: AppConfig, api: Arc<dyn FireflyApi>) -> AppState {
    let notifications = Arc::new(NotificationRuntimeStateManager::new());
    let live_events = Arc::new(LiveEventHub::new());
    let views = Arc::new(ViewRuntimeStateManager::new(
        ViewRuntimeStateRepository::new().shared(),
    ));

    let dashboard = DashboardViewService::new(
        AggregateFetchOrchestrator::new(api.clone(), config.histogram_lookback_secs),
        Arc::new(PagedRecordFetcher::new(api.clone())),
        views,
        notifications.clone(),
        live_events.clone(),
        config.default_page_size,
    );

    AppState {
        config: Arc::new(config),
        api,
        dashboard: Arc::new(dashboard),
        notifications,
        live_events,
    }
}
