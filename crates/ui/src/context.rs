//! Application context
//!
//! One `AppContext` is built at startup and cloned into every component.
//! It owns the shared event manager and alert channel plus one entity
//! service per entity type.

use crate::alerts::AlertService;
use crate::events::EventManager;
use larder_client::{ClientConfig, EntityService, RestClient, RestEntityService};
use larder_core::{Entity, SyncResult};
use larder_model::{Ingredient, Post, Recipe, Review, User};
use std::fmt;
use std::sync::Arc;

/// Shared services for the entity components
#[derive(Clone)]
pub struct AppContext {
    pub events: EventManager,
    pub alerts: AlertService,
    pub users: Arc<dyn EntityService<User>>,
    pub ingredients: Arc<dyn EntityService<Ingredient>>,
    pub recipes: Arc<dyn EntityService<Recipe>>,
    pub posts: Arc<dyn EntityService<Post>>,
    pub reviews: Arc<dyn EntityService<Review>>,
    /// Page size for list views
    pub items_per_page: u32,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("events", &self.events)
            .field("alerts", &self.alerts)
            .field("items_per_page", &self.items_per_page)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build REST-backed services from configuration
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let client = RestClient::new(config)?;
        Ok(Self {
            events: EventManager::new(),
            alerts: AlertService::new(),
            users: Arc::new(RestEntityService::<User>::new(client.clone())),
            ingredients: Arc::new(RestEntityService::<Ingredient>::new(client.clone())),
            recipes: Arc::new(RestEntityService::<Recipe>::new(client.clone())),
            posts: Arc::new(RestEntityService::<Post>::new(client.clone())),
            reviews: Arc::new(RestEntityService::<Review>::new(client)),
            items_per_page: config.items_per_page,
        })
    }

    /// The service for entity type `E`
    pub fn service<E: Entity>(&self) -> Arc<dyn EntityService<E>>
    where
        Self: HasService<E>,
    {
        HasService::<E>::service(self)
    }
}

/// Lookup of the entity service for `E`
pub trait HasService<E: Entity> {
    fn service(&self) -> Arc<dyn EntityService<E>>;
}

macro_rules! has_service {
    ($entity:ty, $field:ident) => {
        impl HasService<$entity> for AppContext {
            fn service(&self) -> Arc<dyn EntityService<$entity>> {
                Arc::clone(&self.$field)
            }
        }
    };
}

has_service!(User, users);
has_service!(Ingredient, ingredients);
has_service!(Recipe, recipes);
has_service!(Post, posts);
has_service!(Review, reviews);
