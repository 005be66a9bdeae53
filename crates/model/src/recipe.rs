//! Recipes
//!
//! A recipe owns a many-to-many ingredient list and an optional author.
//! The server returns both relations eagerly, and the client sends them
//! back as nested records; only their ids matter to the server.

use crate::ingredient::{Ingredient, IngredientWire};
use crate::user::{User, UserWire};
use crate::wire::{inbound, nullable, outbound, Nulls};
use crate::Extra;
use larder_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Recipe
// ============================================================================

/// A dish with instructions and the ingredients it needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    /// Server-assigned id
    pub id: Option<EntityId>,

    /// Recipe title
    pub name: Option<String>,

    /// Short summary shown in lists
    pub description: Option<String>,

    /// Preparation steps
    pub instructions: Option<String>,

    /// Number of servings the recipe yields
    pub servings: Option<u32>,

    /// Ingredients used by the recipe
    pub ingredients: Vec<Ingredient>,

    /// Author of the recipe
    pub user: Option<User>,

    /// Server fields not modelled here
    pub extra: Extra,

    /// Named fields the server sent as `null`
    pub nulls: Nulls,
}

impl Recipe {
    /// Create a draft recipe
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

    /// Add an ingredient
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Check if the recipe lists an ingredient with the given id
    pub fn uses_ingredient(&self, id: EntityId) -> bool {
        self.ingredients.iter().any(|i| i.id == Some(id))
    }
}

/// Wire record for [`Recipe`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWire {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub servings: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Option<Vec<IngredientWire>>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<UserWire>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for Recipe {
    const NAME: &'static str = "Recipe";
    type Wire = RecipeWire;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn to_wire(&self) -> RecipeWire {
        let nulls = &self.nulls;
        // The ingredient set is always sent, unless it arrived as null and is still empty.
        let ingredients = Some(self.ingredients.iter().map(Entity::to_wire).collect::<Vec<_>>())
            .filter(|list| !list.is_empty() || !nulls.contains("ingredients"));
        RecipeWire {
            id: outbound(self.id, "id", nulls),
            name: outbound(self.name.clone(), "name", nulls),
            description: outbound(self.description.clone(), "description", nulls),
            instructions: outbound(self.instructions.clone(), "instructions", nulls),
            servings: outbound(self.servings, "servings", nulls),
            ingredients: outbound(ingredients, "ingredients", nulls),
            user: outbound(self.user.as_ref().map(Entity::to_wire), "user", nulls),
            extra: self.extra.clone(),
        }
    }

    fn from_wire(wire: RecipeWire) -> Self {
        let mut nulls = Nulls::new();
        Self {
            id: inbound(wire.id, "id", &mut nulls),
            name: inbound(wire.name, "name", &mut nulls),
            description: inbound(wire.description, "description", &mut nulls),
            instructions: inbound(wire.instructions, "instructions", &mut nulls),
            servings: inbound(wire.servings, "servings", &mut nulls),
            ingredients: inbound(wire.ingredients, "ingredients", &mut nulls)
                .unwrap_or_default()
                .into_iter()
                .map(Ingredient::from_wire)
                .collect(),
            user: inbound(wire.user, "user", &mut nulls).map(User::from_wire),
            extra: wire.extra,
            nulls,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
