//! Recipe form with ingredient and author pickers

use super::entity_dialog::{EntityDialog, ModalDialog, ReferenceList};
use crate::alerts::AlertService;
use crate::context::AppContext;
use crate::modal::ActiveModal;
use async_trait::async_trait;
use larder_core::{Entity, EntityId};
use larder_model::{Ingredient, Recipe, User};
use std::ops::Deref;

/// Dialog for creating or editing a [`Recipe`]
pub struct RecipeDialog {
    form: EntityDialog<Recipe>,
    alerts: AlertService,
    pub ingredients: ReferenceList<Ingredient>,
    pub users: ReferenceList<User>,
}

impl Deref for RecipeDialog {
    type Target = EntityDialog<Recipe>;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

impl RecipeDialog {
    /// Add or remove a loaded ingredient from the recipe
    ///
    /// Returns false if `id` is not among the loaded choices.
    pub fn toggle_ingredient(&self, id: EntityId) -> bool {
        let Some(ingredient) = self
            .ingredients
            .items()
            .into_iter()
            .find(|i| i.id() == Some(id))
        else {
            return false;
        };

        self.form.edit(|recipe| {
            if recipe.uses_ingredient(id) {
                recipe.ingredients.retain(|i| i.id != Some(id));
            } else {
                recipe.ingredients.push(ingredient);
            }
        });
        true
    }
}

#[async_trait]
impl ModalDialog<Recipe> for RecipeDialog {
    fn build(entity: Recipe, modal: ActiveModal<Recipe>, ctx: &AppContext) -> Self {
        Self {
            form: EntityDialog::new(entity, modal, ctx),
            alerts: ctx.alerts.clone(),
            ingredients: ReferenceList::new(ctx),
            users: ReferenceList::new(ctx),
        }
    }

    async fn init(&self) {
        tokio::join!(
            self.ingredients.load(&self.alerts),
            self.users.load(&self.alerts)
        );
    }
}
