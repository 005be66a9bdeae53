//! # Larder UI
//!
//! Headless view components for the Larder entity screens.
//!
//! Each entity gets the same set of components, all driven by the generic
//! [`larder_client::EntityService`]:
//!
//! - [`EntityListComponent`]: list or search results, reloaded on every
//!   list-modification event
//! - [`EntityDialog`]: create/edit form with save, plus per-entity dialogs
//!   that load the relation lists a form needs
//! - [`EntityDeleteDialog`]: delete confirmation
//! - [`EntityDetailComponent`]: a single entity, reloaded on change
//! - [`EntityPopupService`] / [`PopupComponent`]: modal lifecycle
//!
//! Components talk to each other only through the [`EventManager`] and
//! report failures on the [`AlertService`]. Both live in the
//! [`AppContext`], which is built once and handed to every component.
//!

// ============================================================================
// Modules
// ============================================================================

pub mod alerts;
pub mod components;
pub mod context;
pub mod events;
pub mod modal;
pub mod popup;
pub mod route;

mod tasks;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use larder_client;
pub use larder_core;
pub use larder_model;

pub use alerts::{Alert, AlertLevel, AlertService, MAX_ALERTS};
pub use components::{
    EntityDeleteDialog, EntityDetailComponent, EntityDialog, EntityListComponent, IngredientDialog,
    ListState, LoadState, ModalDialog, PostDialog, RecipeDialog, ReferenceList, ReviewDialog,
};
pub use context::{AppContext, HasService};
pub use events::{Event, EventManager, Subscription};
pub use modal::{ActiveModal, ModalOutcome, ModalRef};
pub use popup::{EntityPopupService, OpenedDialog, PopupComponent};
pub use route::RouteParams;

// ============================================================================
// Constants
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event content sent after a successful save
pub const SAVED_EVENT_CONTENT: &str = "OK";
