//! # Larder Client
//!
//! Type-safe HTTP client for the Larder REST API.
//!
//! ## Architecture
//!
//! [`RestClient`] wraps a `reqwest::Client` with the API base URL and an
//! optional bearer token. [`RestEntityService`] binds it to one entity type
//! and implements the generic [`EntityService`] contract against the
//! conventional resource paths:
//!
//! | Operation | Request                              |
//! |-----------|--------------------------------------|
//! | create    | `POST api/<name>s`                   |
//! | update    | `PUT api/<name>s`                    |
//! | find      | `GET api/<name>s/{id}`               |
//! | query     | `GET api/<name>s?page=&size=&sort=`  |
//! | search    | `GET api/_search/<name>s?query=`     |
//! | delete    | `DELETE api/<name>s/{id}`            |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = RestClient::new(&ClientConfig::load(None)?)?;
//! let reviews = RestEntityService::<Review>::new(client);
//! let saved = reviews.create(&Review::new(5, "great")).await?;
//! ```

pub mod config;
pub mod http;
pub mod response;
pub mod service;

// Re-exports for convenience
pub use config::ClientConfig;
pub use http::{ErrorBody, Reply, RestClient};
pub use response::{PageLinks, ResponseWrapper, TOTAL_COUNT_HEADER, parse_link_header};
pub use service::{EntityService, RestEntityService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
