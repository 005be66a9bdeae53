//! # Dialog Components
//!
//! Modal dialogs for the entity screens.
//!
//! - **EntityDialog**: create/edit form with save, generic over the entity
//! - **ReviewDialog**, **RecipeDialog**, **PostDialog**: forms that also load
//!   the related entities they let the user pick from
//! - **EntityDeleteDialog**: delete confirmation
//!
//! Every dialog implements [`ModalDialog`] so the popup service can open it.

// ============================================================================
// Module Declarations
// ============================================================================

pub mod confirm_delete;
pub mod entity_dialog;
pub mod post_dialog;
pub mod recipe_dialog;
pub mod review_dialog;

// ============================================================================
// Re-exports
// ============================================================================

pub use confirm_delete::EntityDeleteDialog;
pub use entity_dialog::{CANCEL_REASON, EntityDialog, ModalDialog, ReferenceList};
pub use post_dialog::PostDialog;
pub use recipe_dialog::RecipeDialog;
pub use review_dialog::ReviewDialog;

/// Ingredients have no relations to pick, so the generic form is enough
pub type IngredientDialog = EntityDialog<larder_model::Ingredient>;
