//! # Entity List Component
//!
//! Shows all entities of one type, or the results of a search, and reloads
//! whenever the entity's list-modification event is broadcast.
//!
//! The component is a cheap-clone handle: clones share state. The event
//! handler holds only a weak reference, so dropping the last handle ends
//! the subscription instead of keeping the list alive through the event
//! manager.

use crate::alerts::AlertService;
use crate::context::{AppContext, HasService};
use crate::events::{EventManager, Subscription};
use crate::route::RouteParams;
use crate::tasks::{ReloadTasks, lock};
use larder_client::{EntityService, PageLinks, ResponseWrapper};
use larder_core::{Entity, EntityId, RequestOptions, SyncResult};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

// ============================================================================
// State
// ============================================================================

/// Where the last load got to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Last load failed with this message
    Error(String),
}

/// Snapshot of what the list shows
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<E> {
    pub items: Vec<E>,
    pub status: LoadState,
    /// Active search term; empty means "show everything"
    pub current_search: String,
    /// Zero-based page the next query asks for
    pub page: u32,
    /// Sort clauses sent with each query, e.g. `id,asc`
    pub sort: Vec<String>,
    /// `X-Total-Count` from the last query, if the server sent one
    pub total_items: Option<u64>,
    pub links: PageLinks,
}

impl<E> Default for ListState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadState::Idle,
            current_search: String::new(),
            page: 0,
            sort: Vec::new(),
            total_items: None,
            links: PageLinks::default(),
        }
    }
}

// ============================================================================
// Component
// ============================================================================

/// List view for entity type `E`
pub struct EntityListComponent<E: Entity> {
    inner: Arc<ListInner<E>>,
}

struct ListInner<E: Entity> {
    service: Arc<dyn EntityService<E>>,
    events: EventManager,
    alerts: AlertService,
    state: RwLock<ListState<E>>,
    subscription: Mutex<Option<Subscription>>,
    reloads: ReloadTasks,
    page_size: u32,
}

impl<E: Entity> Drop for ListInner<E> {
    fn drop(&mut self) {
        if let Some(subscription) = lock(&self.subscription).take() {
            self.events.destroy(&subscription);
        }
    }
}

impl<E: Entity> Clone for EntityListComponent<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> EntityListComponent<E> {
    /// Build the list from the shared context
    pub fn new(ctx: &AppContext) -> Self
    where
        AppContext: HasService<E>,
    {
        Self::from_parts(
            ctx.service::<E>(),
            ctx.events.clone(),
            ctx.alerts.clone(),
            ctx.items_per_page,
        )
    }

    /// Build the list from individual services
    pub fn from_parts(
        service: Arc<dyn EntityService<E>>,
        events: EventManager,
        alerts: AlertService,
        page_size: u32,
    ) -> Self {
        Self {
            inner: Arc::new(ListInner {
                service,
                events,
                alerts,
                state: RwLock::new(ListState::default()),
                subscription: Mutex::new(None),
                reloads: ReloadTasks::default(),
                page_size,
            }),
        }
    }

    /// Take the search term from the route, subscribe, and load
    pub async fn mount(&self, params: &RouteParams) {
        self.inner.state.write().await.current_search = params.search().unwrap_or_default().to_string();
        self.inner.reloads.bind_current();
        self.register_change_in_entities();
        info!("Mounted {} list", E::NAME);
        // Failures are already on the alert channel
        let _ = self.load_all().await;
    }

    /// Stop reloading on events; requests already sent still complete
    pub fn unmount(&self) {
        if let Some(subscription) = lock(&self.inner.subscription).take() {
            self.inner.events.destroy(&subscription);
            info!("Unmounted {} list", E::NAME);
        }
    }

    /// Check if the list is subscribed to its event topic
    pub fn is_mounted(&self) -> bool {
        lock(&self.inner.subscription).is_some()
    }

    /// Reload the list: search results if a term is set, otherwise the current page
    pub async fn load_all(&self) -> SyncResult<()> {
        let (term, options) = {
            let mut state = self.inner.state.write().await;
            state.status = LoadState::Loading;
            (state.current_search.clone(), self.query_options(&state))
        };

        let result = if term.is_empty() {
            self.inner.service.query(&options).await
        } else {
            self.inner.service.search(&RequestOptions::search(term.as_str())).await
        };

        match result {
            Ok(response) => {
                self.on_success(response, term.is_empty()).await;
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                warn!("Loading {} list failed: {}", E::NAME, err);
                self.inner.alerts.error(message.clone());
                self.inner.state.write().await.status = LoadState::Error(message);
                Err(err)
            }
        }
    }

    /// Show page `page` of everything, dropping any search term
    pub async fn load_page(&self, page: u32) -> SyncResult<()> {
        {
            let mut state = self.inner.state.write().await;
            state.page = page;
            state.current_search.clear();
        }
        self.load_all().await
    }

    /// Follow the `next` link of the last query; false when there is none
    pub async fn next_page(&self) -> SyncResult<bool> {
        self.follow("next").await
    }

    /// Follow the `prev` link of the last query; false when there is none
    pub async fn previous_page(&self) -> SyncResult<bool> {
        self.follow("prev").await
    }

    /// Sort later queries by `sort`; takes effect on the next load
    pub async fn sort_by(&self, sort: Vec<String>) {
        self.inner.state.write().await.sort = sort;
    }

    /// Search for `term`; an empty term shows everything again
    pub async fn search(&self, term: &str) -> SyncResult<()> {
        if term.is_empty() {
            return self.clear().await;
        }
        self.inner.state.write().await.current_search = term.to_string();
        self.load_all().await
    }

    /// Drop the search term and reload everything
    pub async fn clear(&self) -> SyncResult<()> {
        self.inner.state.write().await.current_search.clear();
        self.load_all().await
    }

    /// Wait for reloads triggered by events to finish
    pub async fn wait_idle(&self) {
        self.inner.reloads.wait_idle().await;
    }

    /// Identity of a row
    pub fn track_id(&self, item: &E) -> Option<EntityId> {
        item.id()
    }

    /// Current items
    pub async fn items(&self) -> Vec<E> {
        self.inner.state.read().await.items.clone()
    }

    /// Current load status
    pub async fn status(&self) -> LoadState {
        self.inner.state.read().await.status.clone()
    }

    /// Current search term
    pub async fn current_search(&self) -> String {
        self.inner.state.read().await.current_search.clone()
    }

    /// Full state snapshot
    pub async fn snapshot(&self) -> ListState<E> {
        self.inner.state.read().await.clone()
    }

    fn query_options(&self, state: &ListState<E>) -> RequestOptions {
        state.sort.iter().fold(
            RequestOptions::new().with_page(state.page).with_size(self.inner.page_size),
            |options, order| options.with_sort(order.as_str()),
        )
    }

    async fn follow(&self, rel: &str) -> SyncResult<bool> {
        let target = self.inner.state.read().await.links.get(rel);
        match target {
            Some(page) => self.load_page(page).await.map(|_| true),
            None => Ok(false),
        }
    }

    fn register_change_in_entities(&self) {
        let mut slot = lock(&self.inner.subscription);
        if slot.is_some() {
            return;
        }
        let list: Weak<ListInner<E>> = Arc::downgrade(&self.inner);
        let subscription = self.inner.events.subscribe_list_modified::<E, _>(move |event| {
            let Some(inner) = list.upgrade() else {
                return;
            };
            debug!("{} list reloading on '{}'", E::NAME, event.content);
            let tasks = inner.reloads.clone();
            let reloader = EntityListComponent { inner };
            tasks.spawn(E::NAME, async move {
                let _ = reloader.load_all().await;
            });
        });
        *slot = Some(subscription);
    }

    async fn on_success(&self, response: ResponseWrapper<E>, clear_search: bool) {
        let total = response.total_count();
        let links = match response.links() {
            Ok(links) => links,
            Err(err) => {
                warn!("Ignoring bad Link header on {} list: {}", E::NAME, err);
                PageLinks::default()
            }
        };

        let mut state = self.inner.state.write().await;
        state.items = response.into_items();
        state.total_items = total;
        state.links = links;
        state.status = LoadState::Loaded;
        if clear_search {
            state.current_search.clear();
        }
        debug!("{} list now shows {} item(s)", E::NAME, state.items.len());
    }
}

// ============================================================================
// Tests
// ============================================================================
