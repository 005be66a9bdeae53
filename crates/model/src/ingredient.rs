//! Ingredients

use crate::wire::{inbound, nullable, outbound, Nulls};
use crate::Extra;
use larder_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// A named ingredient that recipes refer to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingredient {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub extra: Extra,
    pub nulls: Nulls,
}

impl Ingredient {
    /// Create a draft ingredient
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wire record for [`Ingredient`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientWire {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for Ingredient {
    const NAME: &'static str = "Ingredient";
    type Wire = IngredientWire;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn to_wire(&self) -> IngredientWire {
        let nulls = &self.nulls;
        IngredientWire {
            id: outbound(self.id, "id", nulls),
            name: outbound(self.name.clone(), "name", nulls),
            description: outbound(self.description.clone(), "description", nulls),
            extra: self.extra.clone(),
        }
    }

    fn from_wire(wire: IngredientWire) -> Self {
        let mut nulls = Nulls::new();
        Self {
            id: inbound(wire.id, "id", &mut nulls),
            name: inbound(wire.name, "name", &mut nulls),
            description: inbound(wire.description, "description", &mut nulls),
            extra: wire.extra,
            nulls,
        }
    }
}
