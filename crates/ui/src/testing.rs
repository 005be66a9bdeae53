//! In-memory entity service for component tests

use crate::alerts::AlertService;
use crate::context::AppContext;
use crate::events::EventManager;
use async_trait::async_trait;
use larder_client::{EntityService, ResponseWrapper};
use larder_core::{Entity, EntityId, RequestOptions, SyncError, SyncResult};
use larder_model::{Ingredient, Post, Recipe, Review, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Operation names used for call counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Create,
    Update,
    Find,
    Query,
    Search,
    Delete,
}

/// Scripted service: returns `items` for query/search, echoes saves
/// (or returns `saved`), and fails any operation listed in `failures`
pub(crate) struct FakeService<E> {
    pub items: Mutex<Vec<E>>,
    pub search_results: Mutex<Vec<E>>,
    pub saved: Mutex<Option<E>>,
    pub failures: Mutex<HashMap<Op, (u16, String)>>,
    pub calls: Mutex<Vec<Op>>,
    pub last_search: Mutex<Option<String>>,
    /// Options of every query, in call order
    pub queries: Mutex<Vec<RequestOptions>>,
    /// When set, create/update wait for a notification before answering
    pub save_gate: Mutex<Option<Arc<Notify>>>,
}

impl<E: Entity> FakeService<E> {
    pub fn new(items: Vec<E>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            search_results: Mutex::new(Vec::new()),
            saved: Mutex::new(None),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            last_search: Mutex::new(None),
            queries: Mutex::new(Vec::new()),
            save_gate: Mutex::new(None),
        })
    }

    pub fn fail(&self, op: Op, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.to_string()));
    }

    pub fn set_items(&self, items: Vec<E>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    fn record(&self, op: Op) -> SyncResult<()> {
        self.calls.lock().unwrap().push(op);
        match self.failures.lock().unwrap().get(&op) {
            Some((status, message)) => Err(SyncError::server(*status, message.clone())),
            None => Ok(()),
        }
    }

    async fn wait_gate(&self) {
        let gate = self.save_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn saved_or(&self, entity: &E) -> E {
        self.saved
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| entity.clone())
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for FakeService<E> {
    async fn create(&self, entity: &E) -> SyncResult<E> {
        self.record(Op::Create)?;
        self.wait_gate().await;
        Ok(self.saved_or(entity))
    }

    async fn update(&self, entity: &E) -> SyncResult<E> {
        self.record(Op::Update)?;
        self.wait_gate().await;
        Ok(self.saved_or(entity))
    }

    async fn find(&self, id: EntityId) -> SyncResult<E> {
        self.record(Op::Find)?;
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned()
            .ok_or_else(|| SyncError::not_found(E::NAME, id))
    }

    async fn query(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>> {
        self.queries.lock().unwrap().push(options.clone());
        self.record(Op::Query)?;
        Ok(ResponseWrapper::ok(self.items.lock().unwrap().clone()))
    }

    async fn search(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>> {
        self.record(Op::Search)?;
        *self.last_search.lock().unwrap() = options.query.clone();
        Ok(ResponseWrapper::ok(self.search_results.lock().unwrap().clone()))
    }

    async fn delete(&self, id: EntityId) -> SyncResult<()> {
        self.record(Op::Delete)?;
        self.items.lock().unwrap().retain(|e| e.id() != Some(id));
        Ok(())
    }
}

/// Fakes behind an `AppContext`
pub(crate) struct Fakes {
    pub ctx: AppContext,
    pub users: Arc<FakeService<User>>,
    pub ingredients: Arc<FakeService<Ingredient>>,
    pub recipes: Arc<FakeService<Recipe>>,
    pub posts: Arc<FakeService<Post>>,
    pub reviews: Arc<FakeService<Review>>,
}

impl Fakes {
    pub fn new() -> Self {
        let users = FakeService::new(vec![User::new("system").with_id(1), User::new("chef").with_id(2)]);
        let ingredients = FakeService::new(vec![Ingredient::new("Basil").with_id(1)]);
        let recipes = FakeService::new(vec![Recipe::new("Pesto").with_id(10)]);
        let posts = FakeService::new(Vec::new());
        let reviews = FakeService::new(vec![Review::new(4, "tasty").with_id(1)]);

        let ctx = AppContext {
            events: EventManager::new(),
            alerts: AlertService::new(),
            users: users.clone(),
            ingredients: ingredients.clone(),
            recipes: recipes.clone(),
            posts: posts.clone(),
            reviews: reviews.clone(),
            items_per_page: 20,
        };

        Self {
            ctx,
            users,
            ingredients,
            recipes,
            posts,
            reviews,
        }
    }
}
