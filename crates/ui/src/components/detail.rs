//! # Entity Detail Component
//!
//! Shows one entity and reloads it when its list-modification event is
//! broadcast. Mounting again with another id switches the view; the
//! reload always fetches the id shown now.

use crate::alerts::AlertService;
use crate::context::{AppContext, HasService};
use crate::events::{EventManager, Subscription};
use crate::tasks::{ReloadTasks, lock};
use larder_client::EntityService;
use larder_core::{Entity, EntityId, SyncResult};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Detail view for entity type `E`
pub struct EntityDetailComponent<E: Entity> {
    inner: Arc<DetailInner<E>>,
}

struct DetailInner<E: Entity> {
    service: Arc<dyn EntityService<E>>,
    events: EventManager,
    alerts: AlertService,
    entity: RwLock<Option<E>>,
    current_id: Mutex<Option<EntityId>>,
    subscription: Mutex<Option<Subscription>>,
    reloads: ReloadTasks,
}

impl<E: Entity> Drop for DetailInner<E> {
    fn drop(&mut self) {
        if let Some(subscription) = lock(&self.subscription).take() {
            self.events.destroy(&subscription);
        }
    }
}

impl<E: Entity> Clone for EntityDetailComponent<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> EntityDetailComponent<E> {
    pub fn new(ctx: &AppContext) -> Self
    where
        AppContext: HasService<E>,
    {
        Self {
            inner: Arc::new(DetailInner {
                service: ctx.service::<E>(),
                events: ctx.events.clone(),
                alerts: ctx.alerts.clone(),
                entity: RwLock::new(None),
                current_id: Mutex::new(None),
                subscription: Mutex::new(None),
                reloads: ReloadTasks::default(),
            }),
        }
    }

    /// Load entity `id` and keep it fresh until `unmount`
    pub async fn mount(&self, id: EntityId) {
        *lock(&self.inner.current_id) = Some(id);
        self.inner.reloads.bind_current();
        {
            let mut slot = lock(&self.inner.subscription);
            if slot.is_none() {
                let detail: Weak<DetailInner<E>> = Arc::downgrade(&self.inner);
                *slot = Some(self.inner.events.subscribe_list_modified::<E, _>(move |_| {
                    let Some(inner) = detail.upgrade() else {
                        return;
                    };
                    let Some(id) = *lock(&inner.current_id) else {
                        return;
                    };
                    debug!("Reloading {} {}", E::NAME, id);
                    let tasks = inner.reloads.clone();
                    let reloader = EntityDetailComponent { inner };
                    tasks.spawn(E::NAME, async move {
                        let _ = reloader.load(id).await;
                    });
                }));
            }
        }
        info!("Mounted {} detail for {}", E::NAME, id);
        let _ = self.load(id).await;
    }

    /// Fetch entity `id`; failures go to the alert channel
    pub async fn load(&self, id: EntityId) -> SyncResult<E> {
        match self.inner.service.find(id).await {
            Ok(entity) => {
                *self.inner.entity.write().await = Some(entity.clone());
                Ok(entity)
            }
            Err(err) => {
                warn!("Loading {} {} failed: {}", E::NAME, id, err);
                self.inner.alerts.error(err.user_message());
                Err(err)
            }
        }
    }

    pub fn unmount(&self) {
        if let Some(subscription) = lock(&self.inner.subscription).take() {
            self.inner.events.destroy(&subscription);
        }
    }

    /// The loaded entity, if any
    pub async fn entity(&self) -> Option<E> {
        self.inner.entity.read().await.clone()
    }

    /// Id given to the last `mount`
    pub fn current_id(&self) -> Option<EntityId> {
        *lock(&self.inner.current_id)
    }

    pub async fn wait_idle(&self) {
        self.inner.reloads.wait_idle().await;
    }
}
