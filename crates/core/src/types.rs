//! Core types used throughout Larder
//!
//! Identifiers, request options, and the naming rules that turn an entity
//! type name into its REST resource paths and event topic.

use heck::{ToKebabCase, ToLowerCamelCase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Server-assigned identifier of a persisted entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Wrap a raw id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

// ============================================================================
// Resource Naming
// ============================================================================

/// Naming rules derived from an entity type name (PascalCase, e.g. "RecipeStep")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceName {
    name: &'static str,
}

impl ResourceName {
    /// Create naming rules for an entity type name
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The entity type name as given
    pub fn entity_name(&self) -> &'static str {
        self.name
    }

    /// Plural path segment, e.g. `recipe-steps`
    pub fn plural(&self) -> String {
        format!("{}s", self.name.to_kebab_case())
    }

    /// Resource path relative to the API root, e.g. `api/reviews`
    pub fn resource_path(&self) -> String {
        format!("api/{}", self.plural())
    }

    /// Full-text search path relative to the API root, e.g. `api/_search/reviews`
    pub fn search_path(&self) -> String {
        format!("api/_search/{}", self.plural())
    }

    /// Event topic broadcast when the entity list changes, e.g. `reviewListModification`
    pub fn list_modification_topic(&self) -> String {
        format!("{}ListModification", self.name.to_lower_camel_case())
    }

    /// Lower-case name used in user-facing messages, e.g. `recipe step`
    pub fn display_name(&self) -> String {
        self.name.to_kebab_case().replace('-', " ")
    }
}

// ============================================================================
// Request Options
// ============================================================================

/// Optional filter and pagination parameters for list and search requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
    /// Sort clauses, e.g. `id,asc`; each becomes its own `sort` parameter
    pub sort: Vec<String>,
    /// Search term for the full-text search endpoint
    pub query: Option<String>,
}

impl RequestOptions {
    /// Options with no parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a search term
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Set the page index
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Append a sort clause
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Check if no parameter is set
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.size.is_none() && self.sort.is_empty() && self.query.is_none()
    }

    /// Render the options as query-string pairs, in a stable order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        for sort in &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(query) = &self.query {
            pairs.push(("query".to_string(), query.clone()));
        }
        pairs
    }
}

// ============================================================================
// Tests
// ============================================================================
