//! List controller
//!
//! Owns the filter state and the last good page of results, and keeps the
//! two consistent with the remote directory. Presentation code reads
//! [`ListView`] snapshots and dispatches intents through the methods here;
//! it never writes the state directly.
//!
//! Every fetch is tagged with a sequence number. A response is applied only
//! when its tag is still the latest issued, so a slow earlier request can
//! never overwrite a fresher result.

use shared::{Employee, EmployeeCreate, EmployeePage, EmployeeUpdate};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ClientResult;
use crate::api::EmployeeService;
use crate::filter::{FilterState, FilterUpdate};

/// Snapshot of everything the list UI renders
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub filter: FilterState,
    /// Latest successful page; kept when a later fetch fails
    pub result: Option<EmployeePage>,
    pub loading: bool,
    /// Message of the last failed fetch, cleared by the next success
    pub error: Option<String>,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<String>,
}

impl ListView {
    pub fn records(&self) -> &[Employee] {
        self.result.as_ref().map(|r| r.records.as_slice()).unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.result.as_ref().map_or(0, |r| r.total)
    }

    pub fn total_pages(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.total_pages)
    }
}

/// How a fetch cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response applied to the view
    Applied,
    /// Request failed; previous result kept, error set
    Failed,
    /// A newer request was issued meanwhile; response dropped
    Superseded,
}

#[derive(Debug, Default)]
struct ControllerState {
    filter: FilterState,
    result: Option<EmployeePage>,
    loading: bool,
    error: Option<String>,
    pending_delete: Option<String>,
    /// Tag of the most recently issued fetch
    latest_request: u64,
    /// Bumped on every search keystroke while debouncing
    search_strokes: u64,
}

/// Paginated, filterable employee list bound to an [`EmployeeService`]
#[derive(Debug)]
pub struct ListController<S> {
    service: Arc<S>,
    state: Arc<Mutex<ControllerState>>,
    search_debounce: Option<Duration>,
}

impl<S> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
            search_debounce: self.search_debounce,
        }
    }
}

impl<S: EmployeeService> ListController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self::with_filter(service, FilterState::default())
    }

    pub fn with_filter(service: Arc<S>, filter: FilterState) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(ControllerState {
                filter,
                ..Default::default()
            })),
            search_debounce: None,
        }
    }

    /// Wait `delay` after a search keystroke and fetch only if no newer
    /// keystroke arrived. Without this every keystroke fetches.
    pub fn with_search_debounce(mut self, delay: Option<Duration>) -> Self {
        self.search_debounce = delay;
        self
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn view(&self) -> ListView {
        let state = self.lock();
        ListView {
            filter: state.filter.clone(),
            result: state.result.clone(),
            loading: state.loading,
            error: state.error.clone(),
            pending_delete: state.pending_delete.clone(),
        }
    }

    pub fn filter(&self) -> FilterState {
        self.lock().filter.clone()
    }

    /// Initial fetch
    pub async fn init(&self) -> FetchOutcome {
        self.refresh().await
    }

    /// Run the fetch cycle with the current filter.
    ///
    /// Also the manual recovery path after a failure; nothing retries
    /// automatically.
    pub async fn refresh(&self) -> FetchOutcome {
        let (tag, query) = {
            let mut state = self.lock();
            state.latest_request += 1;
            state.loading = true;
            (state.latest_request, state.filter.to_query())
        };
        tracing::debug!(tag, ?query, "Fetching employee page");

        let outcome = self.service.list(&query).await;

        let mut state = self.lock();
        if tag != state.latest_request {
            tracing::debug!(tag, latest = state.latest_request, "Discarding stale response");
            return FetchOutcome::Superseded;
        }
        state.loading = false;
        match outcome {
            Ok(page) => {
                tracing::debug!(tag, total = page.total, page = page.page, "Employee page applied");
                state.result = Some(page);
                state.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(tag, error = %e, "Employee list fetch failed");
                state.error = Some(e.user_message());
                FetchOutcome::Failed
            }
        }
    }

    /// Merge `update` into the filter; fetch if the filter changed.
    pub async fn apply_filter(&self, update: FilterUpdate) -> Option<FetchOutcome> {
        if self.replace_filter(|filter| filter.apply(update)) {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Go to page `page` without touching other filters. Pages past the
    /// end are not guarded; whatever the server returns is shown.
    pub async fn set_page(&self, page: u32) -> Option<FetchOutcome> {
        self.apply_filter(FilterUpdate::page(page)).await
    }

    pub async fn next_page(&self) -> Option<FetchOutcome> {
        let page = self.lock().filter.page;
        self.set_page(page.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> Option<FetchOutcome> {
        let page = self.lock().filter.page;
        if page <= 1 {
            return None;
        }
        self.set_page(page - 1).await
    }

    pub async fn set_department(&self, value: impl Into<String>) -> Option<FetchOutcome> {
        self.apply_filter(FilterUpdate::department(value)).await
    }

    pub async fn set_title(&self, value: impl Into<String>) -> Option<FetchOutcome> {
        self.apply_filter(FilterUpdate::title(value)).await
    }

    pub async fn set_location(&self, value: impl Into<String>) -> Option<FetchOutcome> {
        self.apply_filter(FilterUpdate::location(value)).await
    }

    pub async fn set_limit(&self, limit: u32) -> Option<FetchOutcome> {
        self.apply_filter(FilterUpdate::limit(limit)).await
    }

    /// Search keystroke. The filter updates at once; the fetch waits for
    /// the debounce delay when one is configured.
    pub async fn set_search(&self, value: impl Into<String>) -> Option<FetchOutcome> {
        let stroke = {
            let mut state = self.lock();
            let next = state.filter.apply(FilterUpdate::search(value));
            if next == state.filter {
                return None;
            }
            state.filter = next;
            state.search_strokes += 1;
            state.search_strokes
        };

        if let Some(delay) = self.search_debounce {
            tokio::time::sleep(delay).await;
            let latest = self.lock().search_strokes;
            if latest != stroke {
                tracing::debug!(stroke, latest, "Search keystroke superseded");
                return None;
            }
        }
        Some(self.refresh().await)
    }

    pub async fn clear_filters(&self) -> Option<FetchOutcome> {
        if self.replace_filter(|_| FilterState::clear()) {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Create a record, then refresh with the current filter.
    pub async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        let created = self.service.create(payload).await?;
        self.refresh().await;
        Ok(created)
    }

    /// Send a partial update, then refresh with the current filter.
    pub async fn update(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        let updated = self.service.update(id, payload).await?;
        self.refresh().await;
        Ok(updated)
    }

    /// First delete phase: remember `id`, no network call.
    pub fn request_delete(&self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(%id, "Delete requested");
        self.lock().pending_delete = Some(id);
    }

    /// Drop the pending delete. Returns the id that was pending.
    pub fn cancel_delete(&self) -> Option<String> {
        self.lock().pending_delete.take()
    }

    pub fn pending_delete(&self) -> Option<String> {
        self.lock().pending_delete.clone()
    }

    /// Second delete phase: delete the pending record and refresh.
    ///
    /// Returns `Ok(None)` when nothing was pending. The pending id is
    /// cleared whether or not the call succeeds.
    pub async fn confirm_delete(&self) -> ClientResult<Option<String>> {
        let pending = self.lock().pending_delete.take();
        let Some(id) = pending else {
            return Ok(None);
        };

        if let Err(e) = self.service.delete(&id).await {
            tracing::warn!(%id, error = %e, "Delete failed");
            return Err(e);
        }
        // The current page may now be short or empty; it is not moved back.
        self.refresh().await;
        Ok(Some(id))
    }

    fn replace_filter(&self, f: impl FnOnce(&FilterState) -> FilterState) -> bool {
        let mut state = self.lock();
        let next = f(&state.filter);
        if next == state.filter {
            return false;
        }
        state.filter = next;
        true
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
