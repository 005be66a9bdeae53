//! # Larder Core
//!
//! Core types, traits, and error handling for the Larder entity-sync client.
//!
//! This crate provides the building blocks shared by every other crate in
//! the workspace:
//!
//! - **Types**: `EntityId`, `RequestOptions`, `ResourceName`
//! - **Traits**: `Entity`, the explicit domain <-> wire mapping contract
//! - **Errors**: tagged error handling with `SyncError` and `SyncResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ErrorKind, ResultExt, SyncError, SyncResult};
pub use traits::Entity;
pub use types::{EntityId, RequestOptions, ResourceName};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
