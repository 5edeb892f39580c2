//! The Resource List Controller.
//!
//! One controller owns the view state of one list: the current
//! [`ListQuery`], the latest successfully fetched page, and the
//! loading/error status. Every input change issues a fresh fetch describing
//! the full desired state; fetched data is never mutated in place.
//!
//! Two concurrency rules hold regardless of how requests overlap:
//!
//! - **Stale-while-revalidate.** The previously displayed page stays in the
//!   snapshot while a fetch is in flight and after a failure, so the board
//!   never flickers empty.
//! - **Stale responses are discarded.** Every request carries a
//!   monotonically increasing sequence number; a response older than the
//!   newest applied one is dropped on arrival instead of overwriting newer
//!   data. Nothing is cancelled at the transport level, it is simply
//!   ignored when it lands.
//!
//! Auto-refresh polls the same query on a fixed interval, but never while a
//! fetch for the query is already pending (single-flight).

use crate::backend::ListBackend;
use crate::query_key::QueryKey;
use simrs_types::{
    AutoRefresh, FilterValue, ListQuery, PageError, PageSize, ResourcePage, ResourceRecord,
    SortSpec,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Where the controller currently stands with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The displayed page (if any) is the latest applied response.
    Idle,
    /// A fetch is in flight; the previous page remains displayed.
    Loading,
    /// The newest fetch failed; carries the text to show the operator.
    /// The previous page remains displayed.
    Failed(String),
}

/// What a view renders: the latest applied page plus the current status.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub page: Option<ResourcePage<T>>,
    pub status: FetchStatus,
}

struct ListState<T> {
    query: ListQuery,
    page: Option<ResourcePage<T>>,
    status: FetchStatus,
    /// Sequence number of the newest request issued.
    issued: u64,
    /// Sequence number of the newest response applied to the view state.
    applied: u64,
    /// Highest sequence number whose response has arrived (applied or not).
    settled: u64,
    auto: AutoRefresh,
}

/// Controller for one paginated list view.
///
/// Cheap to clone; clones share the same view state and backend.
pub struct ListController<T, B> {
    resource: String,
    backend: Arc<B>,
    state: Arc<Mutex<ListState<T>>>,
}

impl<T, B> Clone for ListController<T, B> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, B> ListController<T, B>
where
    B: ListBackend<T>,
{
    /// Creates a controller for the collection at `resource` with a fresh
    /// query (page 1, default page size, no narrowing).
    pub fn new(resource: impl Into<String>, backend: Arc<B>) -> Self {
        Self {
            resource: resource.into(),
            backend,
            state: Arc::new(Mutex::new(ListState {
                query: ListQuery::new(),
                page: None,
                status: FetchStatus::Idle,
                issued: 0,
                applied: 0,
                settled: 0,
                auto: AutoRefresh::off(),
            })),
        }
    }

    /// Creates a controller for the record type's own resource path.
    pub fn for_record(backend: Arc<B>) -> Self
    where
        T: ResourceRecord,
    {
        Self::new(T::RESOURCE, backend)
    }

    /// The resource collection this controller lists.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The current view snapshot.
    pub async fn snapshot(&self) -> ListSnapshot<T>
    where
        T: Clone,
    {
        let state = self.state.lock().await;
        ListSnapshot {
            page: state.page.clone(),
            status: state.status.clone(),
        }
    }

    /// The current query state.
    pub async fn query(&self) -> ListQuery {
        self.state.lock().await.query.clone()
    }

    /// The identity of the current query.
    pub async fn query_key(&self) -> QueryKey {
        QueryKey::new(&self.resource, &self.state.lock().await.query)
    }

    /// Whether any fetch for this controller is still pending.
    pub async fn in_flight(&self) -> bool {
        let state = self.state.lock().await;
        state.settled < state.issued
    }

    /// Issues a fetch for the current query and applies the response unless
    /// a newer one has been applied in the meantime.
    pub async fn refresh(&self) {
        let (seq, query) = {
            let mut state = self.state.lock().await;
            state.issued += 1;
            state.status = FetchStatus::Loading;
            (state.issued, state.query.clone())
        };

        let key = QueryKey::new(&self.resource, &query);
        tracing::debug!(key = %key, seq, "issuing list fetch");
        let result = self.backend.fetch_page(&self.resource, &query).await;

        let mut state = self.state.lock().await;
        state.settled = state.settled.max(seq);
        if seq < state.applied {
            tracing::debug!(key = %key, seq, "discarding stale list response");
            return;
        }
        state.applied = seq;

        match result {
            Ok(page) => {
                state.page = Some(page);
                if state.issued == seq {
                    state.status = FetchStatus::Idle;
                }
            }
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "list fetch failed");
                if state.issued == seq {
                    state.status = FetchStatus::Failed(error.user_message().to_owned());
                }
            }
        }
    }

    /// Sets the free-text search and refetches.
    pub async fn set_search(&self, text: impl Into<String>) {
        self.state.lock().await.query.set_search(text);
        self.refresh().await;
    }

    /// Clears the free-text search and refetches.
    pub async fn clear_search(&self) {
        self.state.lock().await.query.clear_search();
        self.refresh().await;
    }

    /// Sets a filter selection and refetches.
    pub async fn set_filter(&self, key: impl Into<String>, value: FilterValue) {
        self.state.lock().await.query.set_filter(key, value);
        self.refresh().await;
    }

    /// Removes a filter selection and refetches.
    pub async fn clear_filter(&self, key: &str) {
        self.state.lock().await.query.clear_filter(key);
        self.refresh().await;
    }

    /// Sets or clears the sort selection and refetches.
    pub async fn set_sort(&self, sort: Option<SortSpec>) {
        self.state.lock().await.query.set_sort(sort);
        self.refresh().await;
    }

    /// Navigates to a page and refetches.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ZeroPage`] for page 0; no fetch is issued.
    pub async fn set_page(&self, page: u32) -> Result<(), PageError> {
        self.state.lock().await.query.set_page(page)?;
        self.refresh().await;
        Ok(())
    }

    /// Changes the page size and refetches.
    pub async fn set_page_size(&self, page_size: PageSize) {
        self.state.lock().await.query.set_page_size(page_size);
        self.refresh().await;
    }

    /// Updates the auto-refresh switch.
    pub async fn set_auto_refresh(&self, auto: AutoRefresh) {
        self.state.lock().await.auto = auto;
    }

    /// The current auto-refresh switch.
    pub async fn auto_refresh(&self) -> AutoRefresh {
        self.state.lock().await.auto
    }

    /// One auto-refresh beat: refetches only when auto-refresh is enabled
    /// and no fetch for this query is already pending.
    ///
    /// Returns whether a fetch was issued.
    pub async fn tick(&self) -> bool {
        {
            let state = self.state.lock().await;
            if !state.auto.enabled || state.settled < state.issued {
                return false;
            }
        }
        self.refresh().await;
        true
    }

    /// Drives [`ListController::tick`] on the configured interval until the
    /// returned handle is aborted.
    pub fn spawn_auto_refresh(&self) -> tokio::task::JoinHandle<()>
    where
        T: Send + 'static,
        B: 'static,
    {
        let controller = self.clone();
        tokio::spawn(async move {
            loop {
                let interval = controller.state.lock().await.auto.interval.duration();
                tokio::time::sleep(interval).await;
                controller.tick().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_of, ScriptedBackend, TestRecord};
    use simrs_api::{ApiError, GENERIC_FAILURE_MESSAGE};
    use simrs_types::RefreshInterval;
    use std::time::Duration;

    fn controller(backend: &Arc<ScriptedBackend>) -> ListController<TestRecord, ScriptedBackend> {
        ListController::new("queues", Arc::clone(backend))
    }

    #[tokio::test]
    async fn starts_idle_with_no_page() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.page, None);
        assert_eq!(snapshot.status, FetchStatus::Idle);
        assert!(!list.in_flight().await);
    }

    #[tokio::test]
    async fn refresh_applies_the_fetched_page() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        backend.plan_page(&["A-001", "A-002"]);
        list.refresh().await;

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.status, FetchStatus::Idle);
        assert_eq!(snapshot.page, Some(page_of(&["A-001", "A-002"])));
    }

    #[tokio::test]
    async fn input_changes_refetch_with_the_full_desired_state() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        backend.plan_page(&[]);
        list.set_page(3).await.unwrap();

        backend.plan_page(&[]);
        list.set_filter("status", FilterValue::value("waiting")).await;

        let log = backend.fetch_log.lock().unwrap();
        assert_eq!(log.len(), 2);
        // Narrowing reset the page; the filter travelled with the query.
        let (resource, query) = &log[1];
        assert_eq!(resource, "queues");
        assert_eq!(query.page(), 1);
        assert_eq!(
            query.filter("status"),
            Some(&FilterValue::value("waiting"))
        );
    }

    #[tokio::test]
    async fn page_zero_issues_no_fetch() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        assert!(list.set_page(0).await.is_err());
        assert_eq!(backend.fetch_count(), 0);
    }

    #[tokio::test]
    async fn failure_keeps_the_previous_page_visible() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        backend.plan_page(&["A-001"]);
        list.refresh().await;

        backend.plan_fetch_failure(ApiError::Server { status: 500 });
        list.refresh().await;

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.page, Some(page_of(&["A-001"])));
        assert_eq!(
            snapshot.status,
            FetchStatus::Failed(GENERIC_FAILURE_MESSAGE.to_owned())
        );

        // The next successful fetch clears the error.
        backend.plan_page(&["A-002"]);
        list.refresh().await;
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.status, FetchStatus::Idle);
        assert_eq!(snapshot.page, Some(page_of(&["A-002"])));
    }

    #[tokio::test(start_paused = true)]
    async fn previous_page_stays_visible_while_a_fetch_is_in_flight() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        backend.plan_page(&["A-001"]);
        list.refresh().await;

        backend.plan_page_after(Duration::from_secs(60), &["A-002"]);
        let pending = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        tokio::task::yield_now().await;

        assert!(list.in_flight().await);
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.status, FetchStatus::Loading);
        assert_eq!(snapshot.page, Some(page_of(&["A-001"])));

        pending.await.unwrap();
        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.status, FetchStatus::Idle);
        assert_eq!(snapshot.page, Some(page_of(&["A-002"])));
    }

    #[tokio::test(start_paused = true)]
    async fn a_slow_older_response_never_overwrites_a_newer_one() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        // First request is slow, second is fast: the second's response is
        // applied first and the first must be dropped when it lands.
        backend.plan_page_after(Duration::from_millis(50), &["stale"]);
        backend.plan_page_after(Duration::from_millis(5), &["fresh"]);

        let first = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        tokio::task::yield_now().await;
        let second = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };

        first.await.unwrap();
        second.await.unwrap();

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.page, Some(page_of(&["fresh"])));
        assert_eq!(snapshot.status, FetchStatus::Idle);
        assert_eq!(backend.fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_never_doubles_up_on_an_in_flight_fetch() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);
        list.set_auto_refresh(AutoRefresh::every(RefreshInterval::Seconds15))
            .await;

        backend.plan_page_after(Duration::from_secs(60), &["A-001"]);
        let pending = {
            let list = list.clone();
            tokio::spawn(async move { list.refresh().await })
        };
        tokio::task::yield_now().await;

        // A beat lands while the manual fetch is pending: suppressed.
        assert!(!list.tick().await);
        assert_eq!(backend.fetch_count(), 1);

        pending.await.unwrap();

        backend.plan_page(&["A-001"]);
        assert!(list.tick().await);
        assert_eq!(backend.fetch_count(), 2);
    }

    #[tokio::test]
    async fn tick_does_nothing_while_disabled() {
        let backend = Arc::new(ScriptedBackend::new());
        let list = controller(&backend);

        assert!(!list.tick().await);
        assert_eq!(backend.fetch_count(), 0);
    }
}
