//! # Popup Service
//!
//! Opens entity dialogs inside modals, at most one at a time per service.
//! An id means "edit or delete this entity" and fetches it first; no id
//! means "create" and starts from a draft.

use crate::alerts::AlertService;
use crate::components::ModalDialog;
use crate::context::{AppContext, HasService};
use crate::modal::{ActiveModal, ModalRef};
use crate::route::RouteParams;
use larder_core::{Entity, EntityId, SyncError, SyncResult};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// A dialog that was just opened, with the opener's handle on its modal
pub struct OpenedDialog<D, E> {
    pub dialog: D,
    pub modal: ModalRef<E>,
}

// ============================================================================
// EntityPopupService
// ============================================================================

/// Opens dialogs for entity type `E`
pub struct EntityPopupService<E: Entity> {
    ctx: AppContext,
    is_open: Arc<AtomicBool>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityPopupService<E> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            is_open: Arc::clone(&self.is_open),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityPopupService<E>
where
    AppContext: HasService<E>,
{
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            is_open: Arc::new(AtomicBool::new(false)),
            _entity: PhantomData,
        }
    }

    /// Check if a modal opened by this service is still showing
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Open dialog `D` for entity `id`, or for a new draft
    ///
    /// Fails with `Busy` while a previous modal is still open.
    pub async fn open<D>(&self, id: Option<EntityId>) -> SyncResult<OpenedDialog<D, E>>
    where
        D: ModalDialog<E>,
    {
        if self.is_open.swap(true, Ordering::SeqCst) {
            return Err(SyncError::busy(format!("a {} dialog is already open", E::NAME)));
        }

        let entity = match id {
            Some(id) => match self.ctx.service::<E>().find(id).await {
                Ok(entity) => entity,
                Err(err) => {
                    self.is_open.store(false, Ordering::SeqCst);
                    return Err(err);
                }
            },
            None => E::default(),
        };

        debug!("Opening {} dialog for {:?}", E::NAME, id);
        let (active, modal) = ActiveModal::open_tracked(Arc::clone(&self.is_open));
        let dialog = D::build(entity, active, &self.ctx);
        dialog.init().await;
        Ok(OpenedDialog { dialog, modal })
    }
}

// ============================================================================
// PopupComponent
// ============================================================================

/// Route entry point that opens a dialog from the route's `id`
pub struct PopupComponent<E: Entity> {
    popups: EntityPopupService<E>,
    alerts: AlertService,
}

impl<E: Entity> PopupComponent<E>
where
    AppContext: HasService<E>,
{
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            popups: EntityPopupService::new(ctx),
            alerts: ctx.alerts.clone(),
        }
    }

    pub fn popups(&self) -> &EntityPopupService<E> {
        &self.popups
    }

    /// Open dialog `D` for the route; failures go to the alert channel
    pub async fn open_from_route<D>(&self, params: &RouteParams) -> Option<OpenedDialog<D, E>>
    where
        D: ModalDialog<E>,
    {
        let opened = match params.id() {
            Ok(id) => self.popups.open::<D>(id).await,
            Err(err) => Err(err),
        };
        match opened {
            Ok(opened) => Some(opened),
            Err(err) => {
                warn!("Could not open {} dialog: {}", E::NAME, err);
                self.alerts.error(err.user_message());
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EntityDeleteDialog, IngredientDialog, ReviewDialog};
    use crate::modal::ModalOutcome;
    use crate::testing::{Fakes, Op};
    use larder_model::{Ingredient, Review};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_open_without_id_uses_draft() {
        let fakes = Fakes::new();
        let popups = EntityPopupService::<Ingredient>::new(&fakes.ctx);

        let opened = popups.open::<IngredientDialog>(None).await.unwrap();

        assert_eq!(opened.dialog.entity(), Ingredient::default());
        assert_eq!(fakes.ingredients.count(Op::Find), 0);
        assert!(popups.is_open());
    }

    #[tokio::test]
    async fn test_open_with_id_fetches_and_inits() {
        let fakes = Fakes::new();
        let popups = EntityPopupService::<Review>::new(&fakes.ctx);

        let opened = popups.open::<ReviewDialog>(Some(EntityId(1))).await.unwrap();

        assert_eq!(opened.dialog.entity().comment.as_deref(), Some("tasty"));
        assert_eq!(opened.dialog.users.items().len(), 2);
        assert_eq!(opened.dialog.recipes.items().len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_open_twice_until_closed() {
        let fakes = Fakes::new();
        let popups = EntityPopupService::<Review>::new(&fakes.ctx);

        let first = popups.open::<ReviewDialog>(None).await.unwrap();
        let second = popups.open::<ReviewDialog>(None).await;
        assert!(matches!(second, Err(SyncError::Busy(_))));

        first.dialog.clear();
        assert!(!popups.is_open());
        assert_eq!(
            first.modal.result().await,
            ModalOutcome::Dismissed("cancel".to_string())
        );
        assert!(popups.open::<ReviewDialog>(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_fetch_frees_the_service() {
        let fakes = Fakes::new();
        let popups = EntityPopupService::<Review>::new(&fakes.ctx);

        let err = popups
            .open::<EntityDeleteDialog<Review>>(Some(EntityId(99)))
            .await
            .err()
            .unwrap();

        assert!(err.is_not_found());
        assert!(!popups.is_open());
    }

    #[tokio::test]
    async fn test_open_from_route() {
        let fakes = Fakes::new();
        let popup = PopupComponent::<Review>::new(&fakes.ctx);

        let opened = popup
            .open_from_route::<EntityDeleteDialog<Review>>(&RouteParams::new().with("id", "1"))
            .await
            .unwrap();
        assert_eq!(opened.dialog.entity().id, Some(EntityId(1)));
        assert!(popup.popups().is_open());
    }

    #[tokio::test]
    async fn test_open_from_route_reports_bad_id() {
        let fakes = Fakes::new();
        let popup = PopupComponent::<Review>::new(&fakes.ctx);

        let opened = popup
            .open_from_route::<ReviewDialog>(&RouteParams::new().with("id", "abc"))
            .await;

        assert!(opened.is_none());
        assert_eq!(fakes.ctx.alerts.errors().len(), 1);
        assert!(!popup.popups().is_open());
    }
}
