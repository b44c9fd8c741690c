//! Headless list controller: search, filters, pagination, and reloads.
//!
//! The controller owns the list view's state behind a mutex and talks to an
//! [`EntityService`] for data, so the same controller drives mock and remote
//! modes unchanged. Each reload is tagged with a monotonically increasing
//! generation; a response whose generation is no longer the newest issued is
//! discarded, so overlapping reloads can never settle out of order and
//! clobber fresher rows.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mockable::Clock;
use pagination::PageRequest;
use tracing::debug;

use super::debounce::Debouncer;
use crate::config::ServiceConfig;
use crate::domain::ports::EntityService;
use crate::domain::{EntityId, EntityKind, Envelope, ListQuery, Patch, ServiceError, Stamped};

/// Whether a list view pages its rows or shows the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Server-style paging with the given page size.
    Paged(u32),
    /// The whole filtered collection at once.
    Unpaged,
}

/// A point-in-time copy of the list state, for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot<E: EntityKind> {
    /// Rows for the current page (or the whole collection when unpaged).
    /// Retained from the previous load while a reload is in flight.
    pub rows: Vec<Stamped<E>>,
    /// Total matching records across all pages.
    pub total: u64,
    /// Total page count, at least 1.
    pub pages: u32,
    /// Current 1-based page.
    pub page: u32,
    /// Whether a reload is in flight.
    pub loading: bool,
    /// Whether a reload is in flight and nothing has loaded yet; views
    /// show a placeholder for this, and stale rows otherwise.
    pub initial_loading: bool,
    /// The raw search box text, including keystrokes not yet applied.
    pub search_text: String,
}

struct ListState<E: EntityKind> {
    search_raw: String,
    search_applied: String,
    debouncer: Debouncer,
    filters: BTreeMap<String, String>,
    page: u32,
    in_flight: u32,
    loaded_once: bool,
    rows: Vec<Stamped<E>>,
    total: u64,
    pages: u32,
}

impl<E: EntityKind> ListState<E> {
    fn query(&self) -> ListQuery {
        let mut query = ListQuery::all();
        if !self.search_applied.is_empty() {
            query = query.with_text(self.search_applied.clone());
        }
        for (field, value) in &self.filters {
            query = query.with_filter(field.clone(), value.clone());
        }
        query
    }
}

/// Drives one entity's list view against its service.
pub struct ListController<E: EntityKind> {
    service: Arc<dyn EntityService<E>>,
    clock: Arc<dyn Clock>,
    pagination: PaginationMode,
    state: Mutex<ListState<E>>,
    generation: AtomicU64,
}

impl<E: EntityKind> ListController<E> {
    /// Build a controller over `service`.
    #[must_use]
    pub fn new(
        service: Arc<dyn EntityService<E>>,
        clock: Arc<dyn Clock>,
        debounce_delay: Duration,
        pagination: PaginationMode,
    ) -> Self {
        Self {
            service,
            clock,
            pagination,
            state: Mutex::new(ListState {
                search_raw: String::new(),
                search_applied: String::new(),
                debouncer: Debouncer::new(debounce_delay),
                filters: BTreeMap::new(),
                page: 1,
                in_flight: 0,
                loaded_once: false,
                rows: Vec::new(),
                total: 0,
                pages: 1,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Build a paged controller from configuration: the configured page
    /// size and debounce quiet period.
    #[must_use]
    pub fn paged_from_config(
        service: Arc<dyn EntityService<E>>,
        clock: Arc<dyn Clock>,
        config: &ServiceConfig,
    ) -> Self {
        Self::new(
            service,
            clock,
            config.debounce_delay(),
            PaginationMode::Paged(config.page_size()),
        )
    }

    /// Build an unpaged controller from configuration, keeping the
    /// configured debounce quiet period.
    #[must_use]
    pub fn unpaged_from_config(
        service: Arc<dyn EntityService<E>>,
        clock: Arc<dyn Clock>,
        config: &ServiceConfig,
    ) -> Self {
        Self::new(
            service,
            clock,
            config.debounce_delay(),
            PaginationMode::Unpaged,
        )
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState<E>> {
        // A poisoning panic cannot leave the state structurally invalid,
        // so recover the guard rather than propagate the poison.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Copy the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot<E> {
        let state = self.lock_state();
        ListSnapshot {
            rows: state.rows.clone(),
            total: state.total,
            pages: state.pages,
            page: state.page,
            loading: state.in_flight > 0,
            initial_loading: state.in_flight > 0 && !state.loaded_once,
            search_text: state.search_raw.clone(),
        }
    }

    /// Record a search keystroke; the query is not re-run until the
    /// debounce quiet period elapses and [`Self::poll_search`] observes it.
    pub fn set_search(&self, text: impl Into<String>) {
        let text = text.into();
        let now = self.clock.utc();
        let mut state = self.lock_state();
        state.search_raw.clone_from(&text);
        state.debouncer.input(text, now);
    }

    /// Apply a settled search keystroke, if one has debounced.
    ///
    /// Returns whether a reload ran. Applying a changed search term resets
    /// to page 1; a term equal to the one already applied is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the reload's [`ServiceError`].
    pub async fn poll_search(&self) -> Result<bool, ServiceError> {
        let settled = {
            let now = self.clock.utc();
            let mut state = self.lock_state();
            match state.debouncer.poll(now) {
                Some(text) if text != state.search_applied => {
                    state.search_applied = text;
                    state.page = 1;
                    true
                }
                _ => false,
            }
        };
        if settled {
            self.refresh().await?;
        }
        Ok(settled)
    }

    /// Set or clear a discrete filter and reload from page 1.
    ///
    /// An empty `value` clears the filter (shows all).
    ///
    /// # Errors
    ///
    /// Propagates the reload's [`ServiceError`].
    pub async fn apply_filter(&self, field: &str, value: &str) -> Result<(), ServiceError> {
        {
            let mut state = self.lock_state();
            if value.is_empty() {
                state.filters.remove(field);
            } else {
                state.filters.insert(field.to_owned(), value.to_owned());
            }
            state.page = 1;
        }
        self.refresh().await
    }

    /// Move to `page` (clamped to at least 1) and reload.
    ///
    /// # Errors
    ///
    /// Propagates the reload's [`ServiceError`].
    pub async fn goto_page(&self, page: u32) -> Result<(), ServiceError> {
        {
            let mut state = self.lock_state();
            state.page = page.max(1);
        }
        self.refresh().await
    }

    /// Re-run the current query against the service.
    ///
    /// Rows from the previous load stay visible until the reload settles.
    /// If a newer reload was issued while this one was in flight, this
    /// one's outcome (success or failure) is discarded.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`ServiceError`] when this reload is still
    /// the newest one issued.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        let (generation, query, page) = {
            let mut state = self.lock_state();
            state.in_flight += 1;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, state.query(), state.page)
        };

        let outcome = match self.pagination {
            PaginationMode::Paged(page_size) => self
                .service
                .list_page(&query, PageRequest::new(page, page_size))
                .await
                .map(|envelope| {
                    envelope.into_data().map_or_else(
                        || (Vec::new(), 0, 1),
                        |loaded| {
                            let total = loaded.total();
                            let pages = loaded.pages();
                            (loaded.into_rows(), total, pages)
                        },
                    )
                }),
            PaginationMode::Unpaged => {
                self.service.list(&query).await.map(|envelope| {
                    let rows = envelope.into_data().unwrap_or_default();
                    let total = u64::try_from(rows.len()).unwrap_or(u64::MAX);
                    (rows, total, 1)
                })
            }
        };

        let mut state = self.lock_state();
        state.in_flight = state.in_flight.saturating_sub(1);
        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(
                resource = E::RESOURCE,
                generation, "stale list response discarded"
            );
            return Ok(());
        }
        let (rows, total, pages) = outcome?;
        state.rows = rows;
        state.total = total;
        state.pages = pages;
        state.loaded_once = true;
        Ok(())
    }

    /// Create a record, then reload the current page.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`ServiceError`] from either step.
    pub async fn create(&self, fields: E) -> Result<Envelope<Stamped<E>>, ServiceError> {
        let envelope = self.service.create(fields).await?;
        self.refresh().await?;
        Ok(envelope)
    }

    /// Merge a patch into a record, then reload the current page.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`ServiceError`] from either step.
    pub async fn update(
        &self,
        id: &EntityId,
        patch: Patch,
    ) -> Result<Envelope<Stamped<E>>, ServiceError> {
        let envelope = self.service.update(id, patch).await?;
        self.refresh().await?;
        Ok(envelope)
    }

    /// Delete a record, then reload the current page.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`ServiceError`] from either step.
    pub async fn delete(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        let envelope = self.service.delete(id).await?;
        self.refresh().await?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::outbound::local::{Collection, MemoryStore};
    use crate::service::LocalService;
    use crate::test_support::MutableClock;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Gadget {
        label: String,
        status: String,
    }

    impl EntityKind for Gadget {
        const STORE_KEY: &'static str = "gadgets_v1";
        const ID_PREFIX: &'static str = "gdt";
        const RESOURCE: &'static str = "gadgets";

        fn search_text(&self) -> Vec<String> {
            vec![self.label.clone()]
        }

        fn discrete_field(&self, field: &str) -> Option<String> {
            (field == "status").then(|| self.status.clone())
        }
    }

    fn gadget(label: &str, status: &str) -> Gadget {
        Gadget {
            label: label.to_owned(),
            status: status.to_owned(),
        }
    }

    fn seed(count: usize) -> Vec<Stamped<Gadget>> {
        (0..count)
            .map(|index| {
                Stamped::new(
                    EntityId::new(format!("gdt{index}")),
                    1_700_000_000_000,
                    gadget(&format!("Gadget {index}"), "active"),
                )
            })
            .collect()
    }

    fn fixture(
        rows: Vec<Stamped<Gadget>>,
        pagination: PaginationMode,
    ) -> (Arc<ListController<Gadget>>, Arc<MutableClock>) {
        let clock = Arc::new(MutableClock::at_ms(1_700_000_000_000));
        let collection = Collection::new(Arc::new(MemoryStore::new()), clock.clone(), rows)
            .with_rng_seed(7);
        let service: Arc<dyn EntityService<Gadget>> = Arc::new(LocalService::new(collection));
        let controller = Arc::new(ListController::new(
            service,
            clock.clone(),
            Duration::from_millis(350),
            pagination,
        ));
        (controller, clock)
    }

    #[tokio::test]
    async fn initial_refresh_loads_the_first_page() {
        let (controller, _clock) = fixture(seed(12), PaginationMode::Paged(10));

        controller.refresh().await.expect("refresh resolves");

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.rows.len(), 10);
        assert_eq!(snapshot.total, 12);
        assert_eq!(snapshot.pages, 2);
        assert_eq!(snapshot.page, 1);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn configured_page_size_and_debounce_delay_drive_the_controller() {
        let config = ServiceConfig::mock()
            .with_page_size(5)
            .with_debounce_delay(Duration::from_millis(100));
        let clock = Arc::new(MutableClock::at_ms(1_700_000_000_000));
        let collection =
            Collection::new(Arc::new(MemoryStore::new()), clock.clone(), seed(12)).with_rng_seed(7);
        let service: Arc<dyn EntityService<Gadget>> = Arc::new(LocalService::new(collection));
        let controller = ListController::paged_from_config(service, clock.clone(), &config);

        controller.refresh().await.expect("refresh resolves");
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.rows.len(), 5);
        assert_eq!(snapshot.pages, 3);

        controller.set_search("Gadget 3");
        clock.advance_ms(99);
        assert!(
            !controller.poll_search().await.expect("poll resolves"),
            "configured quiet period has not elapsed"
        );
        clock.advance_ms(1);
        assert!(controller.poll_search().await.expect("poll resolves"));
        assert_eq!(controller.snapshot().total, 1);
    }

    #[tokio::test]
    async fn goto_page_loads_the_remainder() {
        let (controller, _clock) = fixture(seed(12), PaginationMode::Paged(10));
        controller.refresh().await.expect("refresh resolves");

        controller.goto_page(2).await.expect("page change resolves");

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.page, 2);
    }

    #[tokio::test]
    async fn search_waits_for_the_debounce_quiet_period() {
        let (controller, clock) = fixture(seed(12), PaginationMode::Paged(10));
        controller.refresh().await.expect("refresh resolves");
        controller.goto_page(2).await.expect("page change resolves");

        controller.set_search("Gadget 3");
        assert!(
            !controller.poll_search().await.expect("poll resolves"),
            "quiet period has not elapsed"
        );
        assert_eq!(controller.snapshot().page, 2, "page untouched until it fires");

        clock.advance_ms(350);
        assert!(controller.poll_search().await.expect("poll resolves"));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.page, 1, "an applied search resets to page 1");
        assert_eq!(snapshot.total, 1);
        assert_eq!(
            snapshot.rows.first().map(|r| r.fields().label.as_str()),
            Some("Gadget 3")
        );
    }

    #[tokio::test]
    async fn an_unchanged_settled_search_does_not_reload() {
        let (controller, clock) = fixture(seed(3), PaginationMode::Paged(10));
        controller.refresh().await.expect("refresh resolves");

        controller.set_search("Gadget");
        clock.advance_ms(350);
        assert!(controller.poll_search().await.expect("poll resolves"));

        // Typing the same term again settles without a reload.
        controller.set_search("Gadget");
        clock.advance_ms(350);
        assert!(!controller.poll_search().await.expect("poll resolves"));
    }

    #[tokio::test]
    async fn applying_a_filter_resets_to_page_one() {
        let mut rows = seed(12);
        rows.push(Stamped::new(
            EntityId::new("gdtx"),
            1_700_000_000_000,
            gadget("Mothballed", "archived"),
        ));
        let (controller, _clock) = fixture(rows, PaginationMode::Paged(10));
        controller.refresh().await.expect("refresh resolves");
        controller.goto_page(2).await.expect("page change resolves");

        controller
            .apply_filter("status", "archived")
            .await
            .expect("filter resolves");

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.page, 1);
        assert_eq!(snapshot.total, 1);
        assert_eq!(
            snapshot.rows.first().map(|r| r.fields().label.as_str()),
            Some("Mothballed")
        );
    }

    #[tokio::test]
    async fn clearing_a_filter_shows_the_whole_collection() {
        let (controller, _clock) = fixture(seed(3), PaginationMode::Paged(10));
        controller
            .apply_filter("status", "archived")
            .await
            .expect("filter resolves");
        assert_eq!(controller.snapshot().total, 0);

        controller
            .apply_filter("status", "")
            .await
            .expect("filter resolves");
        assert_eq!(controller.snapshot().total, 3);
    }

    #[tokio::test]
    async fn unpaged_mode_returns_the_whole_collection() {
        let (controller, _clock) = fixture(seed(12), PaginationMode::Unpaged);

        controller.refresh().await.expect("refresh resolves");

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.rows.len(), 12);
        assert_eq!(snapshot.pages, 1);
    }

    #[tokio::test]
    async fn mutations_reload_the_current_page() {
        let (controller, _clock) = fixture(seed(2), PaginationMode::Paged(10));
        controller.refresh().await.expect("refresh resolves");

        let created = controller
            .create(gadget("Fresh", "active"))
            .await
            .expect("create resolves");
        assert!(created.ok());
        assert_eq!(controller.snapshot().total, 3);
        assert_eq!(
            controller
                .snapshot()
                .rows
                .first()
                .map(|r| r.fields().label.as_str()),
            Some("Fresh"),
            "new records are prepended"
        );

        let id = created.into_data().map(|r| r.id().clone()).expect("created row");
        controller
            .update(&id, Patch::new().set("status", json!("archived")))
            .await
            .expect("update resolves");
        assert_eq!(
            controller
                .snapshot()
                .rows
                .first()
                .map(|r| r.fields().status.as_str()),
            Some("archived")
        );

        controller.delete(&id).await.expect("delete resolves");
        assert_eq!(controller.snapshot().total, 2);
    }

    /// Service wrapper that parks the next list call on a semaphore so a
    /// test can force two reloads to settle out of order.
    struct StallNext<E: EntityKind> {
        inner: Arc<dyn EntityService<E>>,
        stall_next: AtomicBool,
        release: Semaphore,
    }

    impl<E: EntityKind> StallNext<E> {
        fn new(inner: Arc<dyn EntityService<E>>) -> Self {
            Self {
                inner,
                stall_next: AtomicBool::new(false),
                release: Semaphore::new(0),
            }
        }

        async fn stall_point(&self) {
            if self.stall_next.swap(false, Ordering::SeqCst) {
                let permit = self.release.acquire().await.expect("semaphore open");
                permit.forget();
            }
        }
    }

    #[async_trait]
    impl<E: EntityKind> EntityService<E> for StallNext<E> {
        async fn list(
            &self,
            query: &ListQuery,
        ) -> Result<Envelope<Vec<Stamped<E>>>, ServiceError> {
            self.stall_point().await;
            self.inner.list(query).await
        }

        async fn list_page(
            &self,
            query: &ListQuery,
            page: PageRequest,
        ) -> Result<Envelope<pagination::Page<Stamped<E>>>, ServiceError> {
            self.stall_point().await;
            self.inner.list_page(query, page).await
        }

        async fn create(&self, fields: E) -> Result<Envelope<Stamped<E>>, ServiceError> {
            self.inner.create(fields).await
        }

        async fn update(
            &self,
            id: &EntityId,
            patch: Patch,
        ) -> Result<Envelope<Stamped<E>>, ServiceError> {
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
            self.inner.delete(id).await
        }

        async fn update_matching(
            &self,
            field: &str,
            value: &str,
            patch: Patch,
        ) -> Result<Envelope<u64>, ServiceError> {
            self.inner.update_matching(field, value, patch).await
        }
    }

    #[tokio::test]
    async fn a_slow_older_reload_cannot_clobber_a_newer_one() {
        let clock = Arc::new(MutableClock::at_ms(1_700_000_000_000));
        let collection =
            Collection::new(Arc::new(MemoryStore::new()), clock.clone(), seed(2)).with_rng_seed(7);
        let inner: Arc<dyn EntityService<Gadget>> = Arc::new(LocalService::new(collection));
        let stalled = Arc::new(StallNext::new(inner.clone()));
        let service: Arc<dyn EntityService<Gadget>> = stalled.clone();
        let controller = Arc::new(ListController::new(
            service,
            clock,
            Duration::from_millis(350),
            PaginationMode::Paged(10),
        ));
        controller.refresh().await.expect("refresh resolves");

        // Issue a reload that parks inside the service.
        stalled.stall_next.store(true, Ordering::SeqCst);
        let worker = controller.clone();
        let slow = tokio::spawn(async move { worker.refresh().await });
        tokio::task::yield_now().await;
        assert!(controller.snapshot().loading, "older reload is in flight");

        // A record lands and a newer reload completes while the older one
        // is still parked.
        inner
            .create(gadget("Fresh", "active"))
            .await
            .expect("create resolves");
        controller.refresh().await.expect("newer refresh resolves");
        assert_eq!(controller.snapshot().total, 3);

        // Release the older reload: its response must be discarded.
        stalled.release.add_permits(1);
        slow.await.expect("task joins").expect("older refresh resolves");

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.total, 3, "stale response did not clobber rows");
        assert_eq!(
            snapshot.rows.first().map(|r| r.fields().label.as_str()),
            Some("Fresh")
        );
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn stale_rows_stay_visible_while_a_reload_is_in_flight() {
        let clock = Arc::new(MutableClock::at_ms(1_700_000_000_000));
        let collection =
            Collection::new(Arc::new(MemoryStore::new()), clock.clone(), seed(2)).with_rng_seed(7);
        let inner: Arc<dyn EntityService<Gadget>> = Arc::new(LocalService::new(collection));
        let stalled = Arc::new(StallNext::new(inner));
        let service: Arc<dyn EntityService<Gadget>> = stalled.clone();
        let controller = Arc::new(ListController::new(
            service,
            clock,
            Duration::from_millis(350),
            PaginationMode::Paged(10),
        ));
        controller.refresh().await.expect("refresh resolves");

        stalled.stall_next.store(true, Ordering::SeqCst);
        let worker = controller.clone();
        let slow = tokio::spawn(async move { worker.refresh().await });
        tokio::task::yield_now().await;

        let snapshot = controller.snapshot();
        assert!(snapshot.loading);
        assert!(!snapshot.initial_loading, "rows exist, so no placeholder");
        assert_eq!(snapshot.rows.len(), 2, "previous rows stay visible");

        stalled.release.add_permits(1);
        slow.await.expect("task joins").expect("refresh resolves");
        assert!(!controller.snapshot().loading);
    }
}
