//! Review form: rating and comment, plus reviewer and recipe pickers

use super::entity_dialog::{EntityDialog, ModalDialog, ReferenceList};
use crate::alerts::AlertService;
use crate::context::AppContext;
use crate::modal::ActiveModal;
use async_trait::async_trait;
use larder_model::{Recipe, Review, User};
use std::ops::Deref;

/// Dialog for creating or editing a [`Review`]
pub struct ReviewDialog {
    form: EntityDialog<Review>,
    alerts: AlertService,
    pub users: ReferenceList<User>,
    pub recipes: ReferenceList<Recipe>,
}

impl Deref for ReviewDialog {
    type Target = EntityDialog<Review>;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

#[async_trait]
impl ModalDialog<Review> for ReviewDialog {
    fn build(entity: Review, modal: ActiveModal<Review>, ctx: &AppContext) -> Self {
        Self {
            form: EntityDialog::new(entity, modal, ctx),
            alerts: ctx.alerts.clone(),
            users: ReferenceList::new(ctx),
            recipes: ReferenceList::new(ctx),
        }
    }

    /// Load reviewers and recipes side by side
    async fn init(&self) {
        tokio::join!(self.users.load(&self.alerts), self.recipes.load(&self.alerts));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::modal::ModalOutcome;
    use crate::testing::{Fakes, Op};
    use larder_core::EntityId;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_init_loads_both_reference_lists() {
        let fakes = Fakes::new();
        let (modal, _modal_ref) = ActiveModal::open();
        let dialog = ReviewDialog::build(Review::default(), modal, &fakes.ctx);

        dialog.init().await;

        assert_eq!(dialog.users.items().len(), 2);
        assert_eq!(dialog.recipes.items().len(), 1);
        assert!(fakes.ctx.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_reference_failure_still_shows_form() {
        let fakes = Fakes::new();
        fakes.users.fail(Op::Query, 503, "users down");
        let (modal, _modal_ref) = ActiveModal::open();
        let dialog = ReviewDialog::build(Review::default(), modal, &fakes.ctx);

        dialog.init().await;

        assert!(dialog.users.items().is_empty());
        assert_eq!(dialog.recipes.items().len(), 1);
        assert_eq!(fakes.ctx.alerts.errors(), vec!["users down".to_string()]);
        assert!(dialog.modal().is_open());
    }

    #[tokio::test]
    async fn test_save_new_review_closes_and_notifies_list() {
        let fakes = Fakes::new();
        let saved_review = Review::new(5, "great").with_id(42);
        *fakes.reviews.saved.lock().unwrap() = Some(saved_review.clone());

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        fakes.ctx.events.subscribe("reviewListModification", move |event: &Event| {
            if event.content == "OK" {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let (modal, modal_ref) = ActiveModal::open();
        let dialog = ReviewDialog::build(Review::new(5, "great"), modal, &fakes.ctx);
        dialog.init().await;
        let recipe = dialog.recipes.items()[0].clone();
        dialog.edit(|review| review.recipe = Some(recipe));

        let saved = dialog.save().await.unwrap();

        assert_eq!(saved.id, Some(EntityId(42)));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(modal_ref.result().await, ModalOutcome::Closed(saved_review));
    }
}
