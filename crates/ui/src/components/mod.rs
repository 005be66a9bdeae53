//! # Entity Components
//!
//! Headless versions of the entity screens. Each holds its state behind
//! shared handles and exposes the operations a view would bind to.
//!
//! ```text
//! EntityListComponent   list / search, reloads on list-modification events
//! EntityDetailComponent one entity, reloads on list-modification events
//! Dialogs
//! ├── EntityDialog        create/edit + save
//! ├── ReviewDialog        + users, recipes
//! ├── RecipeDialog        + ingredients, users
//! ├── PostDialog          + users
//! └── EntityDeleteDialog  delete confirmation
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod detail;
pub mod dialogs;
pub mod list;

// ============================================================================
// Re-exports
// ============================================================================

pub use detail::EntityDetailComponent;
pub use dialogs::{
    EntityDeleteDialog, EntityDialog, IngredientDialog, ModalDialog, PostDialog, RecipeDialog,
    ReferenceList, ReviewDialog,
};
pub use list::{EntityListComponent, ListState, LoadState};
