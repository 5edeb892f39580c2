//! Scripted in-memory backends for controller tests.
//!
//! Each planned response is consumed in call order and may carry a delay,
//! which pairs with `tokio::test(start_paused = true)` to reproduce
//! overlapping-request races deterministically.

use crate::backend::{ListBackend, MutationBackend, MutationRequest};
use async_trait::async_trait;
use simrs_api::{ApiError, ApiResult, MutationAck};
use simrs_types::{ListQuery, PageSize, ResourcePage, SearchTerm};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A minimal record for exercising controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TestRecord(pub &'static str);

/// Builds a single-page result set from record names.
pub(crate) fn page_of(names: &[&'static str]) -> ResourcePage<TestRecord> {
    let items: Vec<TestRecord> = names.iter().map(|n| TestRecord(n)).collect();
    let total = items.len() as u64;
    ResourcePage::from_parts(items, 1, PageSize::default(), 1, total)
        .expect("test page respects the invariants")
}

/// A 422 rejection carrying a server message.
pub(crate) fn rejection(message: &str) -> ApiError {
    ApiError::Validation {
        status: 422,
        message: message.to_owned(),
    }
}

/// A backend whose every response is scripted ahead of the call.
pub(crate) struct ScriptedBackend {
    fetches: Mutex<VecDeque<(Duration, ApiResult<ResourcePage<TestRecord>>)>>,
    searches: Mutex<VecDeque<(Duration, ApiResult<Vec<TestRecord>>)>>,
    executions: Mutex<VecDeque<ApiResult<MutationAck>>>,
    pub fetch_log: Mutex<Vec<(String, ListQuery)>>,
    pub search_log: Mutex<Vec<(String, String)>>,
    pub mutation_log: Mutex<Vec<MutationRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            fetches: Mutex::new(VecDeque::new()),
            searches: Mutex::new(VecDeque::new()),
            executions: Mutex::new(VecDeque::new()),
            fetch_log: Mutex::new(Vec::new()),
            search_log: Mutex::new(Vec::new()),
            mutation_log: Mutex::new(Vec::new()),
        }
    }

    pub fn plan_page(&self, names: &[&'static str]) {
        self.plan_page_after(Duration::ZERO, names);
    }

    pub fn plan_page_after(&self, delay: Duration, names: &[&'static str]) {
        self.plan_fetch_result_after(delay, Ok(page_of(names)));
    }

    pub fn plan_fetch_failure(&self, error: ApiError) {
        self.plan_fetch_result_after(Duration::ZERO, Err(error));
    }

    pub fn plan_fetch_result_after(
        &self,
        delay: Duration,
        result: ApiResult<ResourcePage<TestRecord>>,
    ) {
        self.fetches.lock().unwrap().push_back((delay, result));
    }

    pub fn plan_search(&self, names: &[&'static str]) {
        self.plan_search_after(Duration::ZERO, names);
    }

    pub fn plan_search_after(&self, delay: Duration, names: &[&'static str]) {
        let items = names.iter().map(|n| TestRecord(n)).collect();
        self.searches.lock().unwrap().push_back((delay, Ok(items)));
    }

    pub fn plan_search_failure(&self, error: ApiError) {
        self.searches
            .lock()
            .unwrap()
            .push_back((Duration::ZERO, Err(error)));
    }

    pub fn plan_execution(&self, result: ApiResult<MutationAck>) {
        self.executions.lock().unwrap().push_back(result);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_log.lock().unwrap().len()
    }

    pub fn search_count(&self) -> usize {
        self.search_log.lock().unwrap().len()
    }
}

#[async_trait]
impl ListBackend<TestRecord> for ScriptedBackend {
    async fn fetch_page(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> ApiResult<ResourcePage<TestRecord>> {
        let (delay, result) = self
            .fetches
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted fetch_page call");
        self.fetch_log
            .lock()
            .unwrap()
            .push((resource.to_owned(), query.clone()));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn search(&self, resource: &str, term: &SearchTerm) -> ApiResult<Vec<TestRecord>> {
        let (delay, result) = self
            .searches
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted search call");
        self.search_log
            .lock()
            .unwrap()
            .push((resource.to_owned(), term.as_str().to_owned()));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl MutationBackend for ScriptedBackend {
    async fn execute(&self, request: &MutationRequest) -> ApiResult<MutationAck> {
        self.mutation_log.lock().unwrap().push(request.clone());
        self.executions
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted execute call")
    }
}
