use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::client::fetch_error::FetchError;
use crate::core::state::runtime::views::view_runtime_state::{NamespaceView, RoundTicket, Section};
use crate::core::state::runtime::views::view_runtime_state_manager::ViewRuntimeStateManager;
use crate::core::state::runtime::views::view_runtime_state_repository::ViewRuntimeStateRepository;
use crate::domain::dashboard::dto::{Batch, RefreshOutcome};
use crate::domain::dashboard::service::aggregate_fetch::AggregateFetchOrchestrator;
use crate::domain::data::dto::{BlobDownload, DataRecord, Page};
use crate::domain::data::service::{PagedRecordFetcher, PAGE_SIZE_OPTIONS};
use crate::domain::events::live_event_hub::LiveEventHub;
use crate::domain::filter::time_window::{resolve, TimeFilter};
use crate::domain::notification::FetchErrorReporter;
use crate::errors::AppError;
use crate::scheduler::tasks::view_refresh::task::run_view_refresh_loop;

pub type ViewManager = ViewRuntimeStateManager<ViewRuntimeStateRepository>;

/// Unix seconds.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    Utc::now().timestamp()
}

/// Owns every mounted namespace view and keeps it fresh.
pub struct DashboardViewService {
    orchestrator: AggregateFetchOrchestrator,
    pages: Arc<PagedRecordFetcher>,
    views: Arc<ViewManager>,
    reporter: Arc<dyn FetchErrorReporter>,
    live_events: Arc<LiveEventHub>,
    loops: Mutex<HashMap<String, JoinHandle<()>>>,
    default_page_size: u64,
    clock: Clock,
}

impl DashboardViewService {
    pub fn new(
        orchestrator: AggregateFetchOrchestrator,
        pages: Arc<PagedRecordFetcher>,
        views: Arc<ViewManager>,
        reporter: Arc<dyn FetchErrorReporter>,
        live_events: Arc<LiveEventHub>,
        default_page_size: u64,
    ) -> Self {
        Self {
            orchestrator,
            pages,
            views,
            reporter,
            live_events,
            loops: Mutex::new(HashMap::new()),
            default_page_size,
            clock: system_clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn views(&self) -> &Arc<ViewManager> {
        &self.views
    }

    /// Mount a view and start following live events for it.
    ///
    /// Mounting an already mounted namespace keeps the view and its loop and
    /// applies whichever of `time_filter` and `page_size` differ.
    pub async fn mount(
        self: &Arc<Self>,
        namespace: &str,
        time_filter: Option<TimeFilter>,
        page_size: Option<u64>,
    ) -> Result<NamespaceView> {
        let page_size = page_size.map(check_page_size).transpose()?;

        let (epoch, created_now) = self
            .views
            .mount(
                namespace,
                time_filter.unwrap_or_default(),
                page_size.unwrap_or(self.default_page_size),
                (self.clock)(),
            )
            .await;
        if !created_now {
            return self.remount(namespace, time_filter, page_size).await;
        }

        let view = self.snapshot(namespace).await?;
        info!(namespace, epoch, time_filter = %view.time_filter, page_size = view.page_size, "view mounted");

        // Subscribe before the first round so no signal slips in between.
        let subscription = self.live_events.subscribe();
        let handle = tokio::spawn(run_view_refresh_loop(
            Arc::downgrade(self),
            namespace.to_string(),
            subscription,
        ));
        if let Some(previous) = self.loops.lock().await.insert(namespace.to_string(), handle) {
            previous.abort();
        }

        let (round, page) = tokio::join!(self.refresh(namespace), self.fetch_current_page(namespace));
        round?;
        page?;
        self.snapshot(namespace).await
    }

    async fn remount(
        &self,
        namespace: &str,
        time_filter: Option<TimeFilter>,
        page_size: Option<u64>,
    ) -> Result<NamespaceView> {
        let current = self.snapshot(namespace).await?;
        if let Some(time_filter) = time_filter.filter(|t| *t != current.time_filter) {
            self.set_time_filter(namespace, time_filter).await?;
        }
        if let Some(page_size) = page_size.filter(|p| *p != current.page_size) {
            self.set_page(namespace, 0, Some(page_size)).await?;
        }
        self.snapshot(namespace).await
    }

    /// Tear a view down. In-flight rounds for it are dropped on completion.
    pub async fn unmount(&self, namespace: &str) -> Result<()> {
        if let Some(handle) = self.loops.lock().await.remove(namespace) {
            handle.abort();
        }
        if !self.views.unmount(namespace).await {
            return Err(AppError::view_not_mounted(namespace).into());
        }
        info!(namespace, "view unmounted");
        Ok(())
    }

    pub async fn snapshot(&self, namespace: &str) -> Result<NamespaceView> {
        self.views
            .snapshot(namespace)
            .await
            .ok_or_else(|| AppError::view_not_mounted(namespace).into())
    }

    pub async fn mounted_namespaces(&self) -> Vec<String> {
        self.views.mounted_namespaces().await
    }

    /// Change the window. The page index goes back to 0 before the next page
    /// fetch is issued.
    pub async fn set_time_filter(&self, namespace: &str, time_filter: TimeFilter) -> Result<NamespaceView> {
        if !self.views.set_time_filter(namespace, time_filter).await {
            return Err(AppError::view_not_mounted(namespace).into());
        }
        debug!(namespace, %time_filter, "time filter changed");

        let (round, page) = tokio::join!(self.refresh(namespace), self.fetch_current_page(namespace));
        round?;
        page?;
        self.snapshot(namespace).await
    }

    pub async fn set_page(&self, namespace: &str, page_index: u64, page_size: Option<u64>) -> Result<NamespaceView> {
        let current = self.snapshot(namespace).await?;
        let page_size = check_page_size(page_size.unwrap_or(current.page_size))?;
        if !self.views.set_page(namespace, page_index, page_size).await {
            return Err(AppError::view_not_mounted(namespace).into());
        }

        self.fetch_current_page(namespace).await?;
        self.snapshot(namespace).await
    }

    /// One refresh round. A bounded window ends at the moment the round is
    /// issued.
    pub async fn refresh(&self, namespace: &str) -> Result<RefreshOutcome> {
        let now = (self.clock)();
        let ticket = self
            .views
            .begin_round(namespace, now)
            .await
            .ok_or_else(|| AppError::view_not_mounted(namespace))?;

        let results = self
            .orchestrator
            .fetch_round(&ticket.namespace, &ticket.created_filter, now)
            .await;

        for error in results.errors() {
            self.reporter.report_fetch_error(error).await;
        }

        let mut outcome = RefreshOutcome::new(ticket.round);
        self.apply_section(&ticket, &mut outcome, "totals", results.totals, |v| &mut v.totals)
            .await;
        self.apply_section(&ticket, &mut outcome, "messageStatuses", results.message_statuses, |v| {
            &mut v.message_statuses
        })
        .await;
        self.apply_section(&ticket, &mut outcome, "transactionStatuses", results.transaction_statuses, |v| {
            &mut v.transaction_statuses
        })
        .await;
        self.apply_section(&ticket, &mut outcome, "operationStatuses", results.operation_statuses, |v| {
            &mut v.operation_statuses
        })
        .await;
        self.apply_section(&ticket, &mut outcome, "histograms", results.histograms, |v| &mut v.histograms)
            .await;

        debug!(
            namespace,
            round = ticket.round,
            applied = outcome.applied.len(),
            failed = outcome.failed.len(),
            stale = outcome.stale.len(),
            "refresh round finished"
        );
        Ok(outcome)
    }

    /// Fetch the page the view currently points at.
    ///
    /// Items and total are replaced together; on failure the previous page
    /// stays.
    pub async fn fetch_current_page(&self, namespace: &str) -> Result<RefreshOutcome> {
        let ticket = self
            .views
            .begin_page_fetch(namespace, (self.clock)())
            .await
            .ok_or_else(|| AppError::view_not_mounted(namespace))?;

        let page = self
            .pages
            .fetch_data_page(
                &ticket.round.namespace,
                &ticket.round.created_filter,
                ticket.page_index,
                ticket.page_size,
            )
            .await;
        if let Err(error) = &page {
            self.reporter.report_fetch_error(error).await;
        }

        let mut outcome = RefreshOutcome::new(ticket.round.round);
        self.apply_section(&ticket.round, &mut outcome, "dataPage", page.map_err(|e| vec![e]), |v| {
            &mut v.data_page
        })
        .await;
        Ok(outcome)
    }

    /// One-shot page fetch outside any mounted view.
    pub async fn fetch_data_page(
        &self,
        namespace: &str,
        time_filter: TimeFilter,
        page_index: u64,
        page_size: Option<u64>,
    ) -> Result<Page<DataRecord>> {
        let page_size = check_page_size(page_size.unwrap_or(self.default_page_size))?;
        let created = resolve(time_filter, (self.clock)());
        let page = self
            .pages
            .fetch_data_page(namespace, &created, page_index, page_size)
            .await;
        Ok(self.reported(page).await?)
    }

    pub async fn fetch_blob(&self, namespace: &str, data_id: &str) -> Result<BlobDownload> {
        let blob = self.pages.fetch_blob_download(namespace, data_id).await;
        Ok(self.reported(blob).await?)
    }

    async fn reported<T>(&self, result: Result<T, FetchError>) -> Result<T, FetchError> {
        if let Err(error) = &result {
            self.reporter.report_fetch_error(error).await;
        }
        result
    }

    async fn apply_section<T, F>(
        &self,
        ticket: &RoundTicket,
        outcome: &mut RefreshOutcome,
        name: &'static str,
        batch: Batch<T>,
        section: F,
    ) where
        T: Send,
        F: FnOnce(&mut NamespaceView) -> &mut Section<T> + Send,
    {
        match batch {
            Ok(value) => {
                let applied = self.views.apply(ticket, section, value).await;
                outcome.record(name, applied);
            }
            Err(errors) => outcome.fail(name, errors.len()),
        }
    }

    /// Abort every refresh loop. Views stay mounted.
    pub async fn shutdown(&self) {
        for (_, handle) in self.loops.lock().await.drain() {
            handle.abort();
        }
    }
}

fn check_page_size(page_size: u64) -> Result<u64> {
    if PAGE_SIZE_OPTIONS.contains(&page_size) {
        Ok(page_size)
    } else {
        Err(AppError::BadRequest(format!(
            "page size {} is not one of {:?}",
            page_size, PAGE_SIZE_OPTIONS
        ))
        .into())
    }
}
