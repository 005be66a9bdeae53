//! Route parameters handed to components when they mount

use larder_core::{EntityId, SyncError, SyncResult};
use std::collections::HashMap;

/// Route parameter holding an entity id
pub const ID_PARAM: &str = "id";

/// Route parameter holding a search term
pub const SEARCH_PARAM: &str = "search";

/// Matrix/path parameters of the current route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// No parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Raw parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The `id` parameter; empty values count as absent
    pub fn id(&self) -> SyncResult<Option<EntityId>> {
        match self.get(ID_PARAM).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| SyncError::Parse(format!("invalid id in route: '{}'", raw))),
            None => Ok(None),
        }
    }

    /// The `search` parameter; empty values count as absent
    pub fn search(&self) -> Option<&str> {
        self.get(SEARCH_PARAM).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_param() {
        assert_eq!(RouteParams::new().with("id", "42").id().unwrap(), Some(EntityId(42)));
        assert_eq!(RouteParams::new().id().unwrap(), None);
        assert_eq!(RouteParams::new().with("id", "").id().unwrap(), None);
        assert!(RouteParams::new().with("id", "abc").id().is_err());
    }

    #[test]
    fn test_search_param() {
        assert_eq!(RouteParams::new().with("search", "pesto").search(), Some("pesto"));
        assert_eq!(RouteParams::new().with("search", "").search(), None);
    }
}
