use std::sync::Arc;

use crate::core::state::runtime::views::view_runtime_state::{
    NamespaceView, PageTicket, RoundTicket, Section,
};
use crate::core::state::runtime::views::view_runtime_state_repository_trait::ViewRuntimeStateRepositoryTrait;
use crate::domain::filter::time_window::TimeFilter;

pub struct ViewRuntimeStateManager<R: ViewRuntimeStateRepositoryTrait> {
    pub(crate) repo: Arc<R>,
}

impl<R: ViewRuntimeStateRepositoryTrait> ViewRuntimeStateManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the view epoch and whether this call created the view.
    pub async fn mount(&self, namespace: &str, time_filter: TimeFilter, page_size: u64, now: i64) -> (u64, bool) {
        self.repo
            .update(|state| state.mount(namespace, time_filter, page_size, now))
            .await
    }

    pub async fn unmount(&self, namespace: &str) -> bool {
        self.repo.update(|state| state.unmount(namespace)).await
    }

    pub async fn is_mounted(&self, namespace: &str, epoch: u64) -> bool {
        self.repo
            .get()
            .await
            .views
            .get(namespace)
            .is_some_and(|v| v.epoch == epoch)
    }

    pub async fn snapshot(&self, namespace: &str) -> Option<NamespaceView> {
        self.repo.get().await.views.get(namespace).cloned()
    }

    pub async fn mounted_namespaces(&self) -> Vec<String> {
        let state = self.repo.get().await;
        let mut names: Vec<String> = state.views.keys().cloned().collect();
        names.sort();
        names
    }

    /// Issue a round; its window is resolved against `now`.
    pub async fn begin_round(&self, namespace: &str, now: i64) -> Option<RoundTicket> {
        self.repo.update(|state| state.begin_round(namespace, now)).await
    }

    pub async fn begin_page_fetch(&self, namespace: &str, now: i64) -> Option<PageTicket> {
        self.repo.update(|state| state.begin_page_fetch(namespace, now)).await
    }

    pub async fn set_time_filter(&self, namespace: &str, time_filter: TimeFilter) -> bool {
        self.repo
            .update(|state| state.set_time_filter(namespace, time_filter))
            .await
    }

    pub async fn set_page(&self, namespace: &str, page_index: u64, page_size: u64) -> bool {
        self.repo
            .update(|state| state.set_page(namespace, page_index, page_size))
            .await
    }

    /// Replace one section of the ticket's view.
    ///
    /// Dropped when the view was unmounted (or remounted) since the ticket
    /// was issued, or when a higher round already wrote the section.
    pub async fn apply<T, F>(&self, ticket: &RoundTicket, section: F, value: T) -> bool
    where
        T: Send,
        F: FnOnce(&mut NamespaceView) -> &mut Section<T> + Send,
    {
        self.repo
            .update(|state| match state.view_for(ticket) {
                Some(view) => section(view).try_apply(ticket.round, value),
                None => false,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::runtime::views::view_runtime_state::SummaryTotals;
    use crate::core::state::runtime::views::view_runtime_state_repository::ViewRuntimeStateRepository;

    const NOW: i64 = 1_700_100_000;

    fn manager() -> ViewRuntimeStateManager<ViewRuntimeStateRepository> {
        ViewRuntimeStateManager::new(ViewRuntimeStateRepository::new().shared())
    }

    fn totals(n: u64) -> SummaryTotals {
        SummaryTotals {
            messages: n,
            transactions: n,
            operations: n,
            events: n,
        }
    }

    #[tokio::test]
    async fn apply_after_unmount_is_a_no_op() {
        let m = manager();
        m.mount("default", TimeFilter::None, 10, NOW).await;
        let ticket = m.begin_round("default", NOW).await.unwrap();
        assert!(m.unmount("default").await);

        assert!(!m.apply(&ticket, |v| &mut v.totals, totals(1)).await);
        assert!(m.snapshot("default").await.is_none());
    }

    #[tokio::test]
    async fn completion_order_wins_unless_newer_round_applied() {
        let m = manager();
        m.mount("default", TimeFilter::None, 10, NOW).await;
        let older = m.begin_round("default", NOW).await.unwrap();
        let newer = m.begin_round("default", NOW).await.unwrap();

        // Older completes first: applied.
        assert!(m.apply(&older, |v| &mut v.totals, totals(1)).await);
        // Newer completes next: applied over it.
        assert!(m.apply(&newer, |v| &mut v.totals, totals(2)).await);
        // A straggler from before both is dropped.
        assert!(!m.apply(&older, |v| &mut v.totals, totals(1)).await);

        let view = m.snapshot("default").await.unwrap();
        assert_eq!(view.totals.value, Some(totals(2)));
    }

    #[tokio::test]
    async fn sections_track_rounds_independently() {
        let m = manager();
        m.mount("default", TimeFilter::None, 10, NOW).await;
        let r1 = m.begin_round("default", NOW).await.unwrap();
        let r2 = m.begin_round("default", NOW).await.unwrap();

        assert!(m.apply(&r2, |v| &mut v.totals, totals(2)).await);
        assert!(m.apply(&r1, |v| &mut v.message_statuses, Vec::new()).await);
        assert_eq!(m.mounted_namespaces().await, vec!["default".to_string()]);
    }
}
