//! # Delete Confirmation Dialog
//!
//! Asks before deleting an entity. Confirming sends the DELETE, announces
//! the change on the entity's list-modification topic, and closes the
//! modal; a failure leaves the modal open so the user can retry or cancel.

use super::entity_dialog::{CANCEL_REASON, ModalDialog};
use crate::alerts::AlertService;
use crate::context::{AppContext, HasService};
use crate::events::{Event, EventManager};
use crate::modal::ActiveModal;
use async_trait::async_trait;
use larder_client::EntityService;
use larder_core::{Entity, EntityId, SyncResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Delete confirmation for one entity of type `E`
pub struct EntityDeleteDialog<E: Entity> {
    entity: E,
    service: Arc<dyn EntityService<E>>,
    events: EventManager,
    alerts: AlertService,
    modal: ActiveModal<E>,
}

impl<E: Entity> EntityDeleteDialog<E> {
    pub fn new(entity: E, modal: ActiveModal<E>, ctx: &AppContext) -> Self
    where
        AppContext: HasService<E>,
    {
        Self {
            entity,
            service: ctx.service::<E>(),
            events: ctx.events.clone(),
            alerts: ctx.alerts.clone(),
            modal,
        }
    }

    /// The entity up for deletion
    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn modal(&self) -> &ActiveModal<E> {
        &self.modal
    }

    /// Content of the event broadcast after a delete
    pub fn deleted_message() -> String {
        format!("Deleted an {}", E::resource().display_name())
    }

    /// Delete entity `id`
    pub async fn confirm_delete(&self, id: EntityId) -> SyncResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.events
                    .broadcast(Event::list_modified::<E>(Self::deleted_message()));
                info!("Deleted {} {}", E::NAME, id);
                self.modal.close(self.entity.clone());
                Ok(())
            }
            Err(err) => {
                warn!("Deleting {} {} failed: {}", E::NAME, id, err);
                self.alerts.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Dismiss without deleting
    pub fn clear(&self) {
        self.modal.dismiss(CANCEL_REASON);
    }
}

#[async_trait]
impl<E: Entity> ModalDialog<E> for EntityDeleteDialog<E>
where
    AppContext: HasService<E>,
{
    fn build(entity: E, modal: ActiveModal<E>, ctx: &AppContext) -> Self {
        Self::new(entity, modal, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityListComponent;
    use crate::modal::ModalOutcome;
    use crate::route::RouteParams;
    use crate::testing::{Fakes, Op};
    use larder_model::Review;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[test]
    fn test_deleted_message() {
        assert_eq!(EntityDeleteDialog::<Review>::deleted_message(), "Deleted an review");
    }

    #[tokio::test]
    async fn test_confirm_delete_broadcasts_and_closes() {
        let fakes = Fakes::new();
        let contents = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&contents);
        fakes.ctx.events.subscribe("reviewListModification", move |event| {
            sink.lock().unwrap().push(event.content.clone());
        });

        let review = Review::new(4, "tasty").with_id(1);
        let (modal, modal_ref) = ActiveModal::open();
        let dialog = EntityDeleteDialog::new(review.clone(), modal, &fakes.ctx);

        dialog.confirm_delete(EntityId(1)).await.unwrap();

        assert_eq!(*contents.lock().unwrap(), vec!["Deleted an review".to_string()]);
        assert_eq!(modal_ref.result().await, ModalOutcome::Closed(review));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list_and_modal() {
        let fakes = Fakes::new();
        let list = EntityListComponent::<Review>::new(&fakes.ctx);
        list.mount(&RouteParams::new()).await;
        let before = list.items().await;

        fakes.reviews.fail(Op::Delete, 500, "error.http.500");
        let (modal, mut modal_ref) = ActiveModal::open();
        let dialog = EntityDeleteDialog::new(before[0].clone(), modal, &fakes.ctx);

        assert!(dialog.confirm_delete(EntityId(7)).await.is_err());
        list.wait_idle().await;

        assert_eq!(list.items().await, before);
        assert_eq!(fakes.reviews.count(Op::Query), 1);
        assert_eq!(fakes.ctx.alerts.errors(), vec!["error.http.500".to_string()]);
        assert!(dialog.modal().is_open());
        assert_eq!(modal_ref.try_result(), None);
        list.unmount();
    }

    #[tokio::test]
    async fn test_clear_dismisses() {
        let fakes = Fakes::new();
        let (modal, modal_ref) = ActiveModal::open();
        let dialog = EntityDeleteDialog::new(Review::default(), modal, &fakes.ctx);

        dialog.clear();

        assert!(modal_ref.result().await.is_dismissed());
    }
}
