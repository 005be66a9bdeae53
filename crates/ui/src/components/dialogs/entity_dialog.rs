//! # Entity Dialog
//!
//! Create/edit form for one entity, shown inside a modal.
//!
//! - `save()` creates a draft or updates an existing entity
//! - on success the list-modification event is broadcast and the modal
//!   closes with the saved entity
//! - on failure the modal stays open and the error goes to the alert channel
//!
//! Forms that pick related entities (a review's recipe, a recipe's
//! ingredients) load those choices through [`ReferenceList`].

use crate::SAVED_EVENT_CONTENT;
use crate::alerts::AlertService;
use crate::context::{AppContext, HasService};
use crate::events::{Event, EventManager};
use crate::modal::ActiveModal;
use crate::tasks::lock;
use async_trait::async_trait;
use larder_client::EntityService;
use larder_core::{Entity, EntityId, RequestOptions, SyncError, SyncResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Dismiss reason used by `clear()`
pub const CANCEL_REASON: &str = "cancel";

// ============================================================================
// ModalDialog
// ============================================================================

/// A dialog the popup service can open around an entity
#[async_trait]
pub trait ModalDialog<E: Entity>: Send + Sync + Sized {
    /// Build the dialog for `entity` inside `modal`
    fn build(entity: E, modal: ActiveModal<E>, ctx: &AppContext) -> Self;

    /// Load whatever the dialog needs before it is shown
    async fn init(&self) {}
}

// ============================================================================
// EntityDialog
// ============================================================================

/// Form state and save logic shared by every entity dialog
pub struct EntityDialog<E: Entity> {
    entity: Arc<Mutex<E>>,
    is_saving: Arc<AtomicBool>,
    service: Arc<dyn EntityService<E>>,
    events: EventManager,
    alerts: AlertService,
    modal: ActiveModal<E>,
}

impl<E: Entity> Clone for EntityDialog<E> {
    fn clone(&self) -> Self {
        Self {
            entity: Arc::clone(&self.entity),
            is_saving: Arc::clone(&self.is_saving),
            service: Arc::clone(&self.service),
            events: self.events.clone(),
            alerts: self.alerts.clone(),
            modal: self.modal.clone(),
        }
    }
}

impl<E: Entity> EntityDialog<E> {
    pub fn new(entity: E, modal: ActiveModal<E>, ctx: &AppContext) -> Self
    where
        AppContext: HasService<E>,
    {
        Self {
            entity: Arc::new(Mutex::new(entity)),
            is_saving: Arc::new(AtomicBool::new(false)),
            service: ctx.service::<E>(),
            events: ctx.events.clone(),
            alerts: ctx.alerts.clone(),
            modal,
        }
    }

    /// Copy of the entity being edited
    pub fn entity(&self) -> E {
        lock(&self.entity).clone()
    }

    /// Apply a form change to the entity
    pub fn edit<F>(&self, change: F)
    where
        F: FnOnce(&mut E),
    {
        change(&mut lock(&self.entity));
    }

    /// Check if a save is in flight
    pub fn is_saving(&self) -> bool {
        self.is_saving.load(Ordering::SeqCst)
    }

    /// The modal this dialog lives in
    pub fn modal(&self) -> &ActiveModal<E> {
        &self.modal
    }

    /// Dismiss the modal without saving
    pub fn clear(&self) {
        self.modal.dismiss(CANCEL_REASON);
    }

    /// Create or update the entity
    ///
    /// Refused with `Busy` while another save from this dialog is in flight.
    pub async fn save(&self) -> SyncResult<E> {
        if self.is_saving.swap(true, Ordering::SeqCst) {
            return Err(SyncError::busy(format!("{} save already in progress", E::NAME)));
        }

        let entity = self.entity();
        let result = match entity.id() {
            Some(id) => {
                debug!("Updating {} {}", E::NAME, id);
                self.service.update(&entity).await
            }
            None => {
                debug!("Creating {}", E::NAME);
                self.service.create(&entity).await
            }
        };

        match result {
            Ok(saved) => {
                self.on_save_success(saved.clone());
                Ok(saved)
            }
            Err(err) => {
                self.on_save_error(&err);
                Err(err)
            }
        }
    }

    fn on_save_success(&self, saved: E) {
        self.events
            .broadcast(Event::list_modified::<E>(SAVED_EVENT_CONTENT));
        self.is_saving.store(false, Ordering::SeqCst);
        *lock(&self.entity) = saved.clone();
        info!("Saved {} {:?}", E::NAME, saved.id());
        self.modal.close(saved);
    }

    fn on_save_error(&self, err: &SyncError) {
        self.is_saving.store(false, Ordering::SeqCst);
        warn!("Saving {} failed: {}", E::NAME, err);
        self.alerts.error(err.user_message());
    }
}

#[async_trait]
impl<E: Entity> ModalDialog<E> for EntityDialog<E>
where
    AppContext: HasService<E>,
{
    fn build(entity: E, modal: ActiveModal<E>, ctx: &AppContext) -> Self {
        Self::new(entity, modal, ctx)
    }
}

// ============================================================================
// ReferenceList
// ============================================================================

/// Choices for a relation field, loaded once when a dialog opens
pub struct ReferenceList<R: Entity> {
    service: Arc<dyn EntityService<R>>,
    items: Arc<Mutex<Vec<R>>>,
}

impl<R: Entity> Clone for ReferenceList<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            items: Arc::clone(&self.items),
        }
    }
}

impl<R: Entity> ReferenceList<R> {
    pub fn new(ctx: &AppContext) -> Self
    where
        AppContext: HasService<R>,
    {
        Self {
            service: ctx.service::<R>(),
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fetch the choices; a failure is reported and keeps the previous ones
    pub async fn load(&self, alerts: &AlertService) -> bool {
        match self.service.query(&RequestOptions::new()).await {
            Ok(response) => {
                *lock(&self.items) = response.into_items();
                true
            }
            Err(err) => {
                warn!("Loading {} choices failed: {}", R::NAME, err);
                alerts.error(err.user_message());
                false
            }
        }
    }

    pub fn items(&self) -> Vec<R> {
        lock(&self.items).clone()
    }

    pub fn track_id(&self, item: &R) -> Option<EntityId> {
        item.id()
    }
}

// ============================================================================
// Tests
// ============================================================================
