//! # Larder Model
//!
//! Domain entities of the recipe sharing application and the wire records
//! they map to.
//!
//! ## Core Concepts
//!
//! - **User**: an account; referenced by recipes, posts, and reviews
//! - **Ingredient**: a named ingredient; recipes hold many of them
//! - **Recipe**: a dish with instructions and its ingredient list
//! - **Post**: a dated blog post written by a user
//! - **Review**: a rating and comment left by a user on a recipe
//!
//! Each domain type implements [`larder_core::Entity`] with an explicit
//! field-by-field mapping to its camelCase wire record. Wire records keep
//! every field they do not name in a flattened `extra` map, and the domain
//! types carry that map through. Named fields that arrived as `null` are
//! remembered as well (see [`wire`]), so nothing the server sends is dropped
//! or rewritten on a round trip.

// Module declarations
pub mod ingredient;
pub mod post;
pub mod recipe;
pub mod review;
pub mod user;
pub mod wire;

// Re-export commonly used types at crate root
pub use ingredient::{Ingredient, IngredientWire};
pub use post::{Post, PostWire};
pub use recipe::{Recipe, RecipeWire};
pub use review::{Review, ReviewWire};
pub use user::{User, UserWire};
pub use wire::Nulls;

// Re-export core types that are commonly used with the model
pub use larder_core::{Entity, EntityId, SyncError, SyncResult};

/// Fields the server sent that the wire record does not name
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
