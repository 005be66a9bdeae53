//! Core traits for Larder
//!
//! `Entity` is the contract every synced record type implements. It pairs
//! a domain type with a serde wire record and requires an explicit mapping
//! in each direction, so the compiler checks the conversion against both
//! record shapes.

use crate::types::{EntityId, ResourceName};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Entity Trait
// ============================================================================

/// A record synced with a REST resource
///
/// `Default` yields a fresh draft: a record with no id that has never been
/// sent to the server.
///
/// # Example
///
/// ```rust,ignore
/// use larder_core::{Entity, EntityId};
///
/// #[derive(Clone, Default)]
/// struct Tag { id: Option<EntityId>, label: String }
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct TagWire { id: Option<EntityId>, label: String }
///
/// impl Entity for Tag {
///     const NAME: &'static str = "Tag";
///     type Wire = TagWire;
///
///     fn id(&self) -> Option<EntityId> { self.id }
///     fn to_wire(&self) -> TagWire { TagWire { id: self.id, label: self.label.clone() } }
///     fn from_wire(w: TagWire) -> Self { Tag { id: w.id, label: w.label } }
/// }
/// ```
pub trait Entity: Clone + Default + Send + Sync + 'static {
    /// PascalCase type name, e.g. "Review"
    const NAME: &'static str;

    /// Shape of the record on the wire
    type Wire: Serialize + DeserializeOwned + Send + Sync;

    /// Server-assigned id, absent for drafts
    fn id(&self) -> Option<EntityId>;

    /// Outbound mapping: a plain copy suitable for serialization
    fn to_wire(&self) -> Self::Wire;

    /// Inbound mapping: a fresh domain record built from the parsed body
    fn from_wire(wire: Self::Wire) -> Self;

    /// Naming rules for this entity's resource paths and event topic
    fn resource() -> ResourceName {
        ResourceName::new(Self::NAME)
    }

    /// Check if the record has never been persisted
    fn is_draft(&self) -> bool {
        self.id().is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Tag {
        id: Option<EntityId>,
        label: String,
    }

    #[derive(Serialize, Deserialize)]
    struct TagWire {
        id: Option<EntityId>,
        label: String,
    }

    impl Entity for Tag {
        const NAME: &'static str = "Tag";
        type Wire = TagWire;

        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn to_wire(&self) -> TagWire {
            TagWire {
                id: self.id,
                label: self.label.clone(),
            }
        }

        fn from_wire(wire: TagWire) -> Self {
            Tag {
                id: wire.id,
                label: wire.label,
            }
        }
    }

    #[test]
    fn test_default_is_draft() {
        assert!(Tag::default().is_draft());
        let saved = Tag {
            id: Some(EntityId(3)),
            label: "vegan".to_string(),
        };
        assert!(!saved.is_draft());
    }

    #[test]
    fn test_resource_from_name() {
        assert_eq!(Tag::resource().resource_path(), "api/tags");
        assert_eq!(Tag::resource().list_modification_topic(), "tagListModification");
    }

    #[test]
    fn test_wire_mapping_round_trip() {
        let tag = Tag {
            id: Some(EntityId(9)),
            label: "spicy".to_string(),
        };
        let json = serde_json::to_value(tag.to_wire()).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 9, "label": "spicy" }));
        let back = Tag::from_wire(serde_json::from_value(json).unwrap());
        assert_eq!(back, tag);
    }
}
