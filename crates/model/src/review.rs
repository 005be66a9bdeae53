//! Recipe reviews

use crate::recipe::{Recipe, RecipeWire};
use crate::user::{User, UserWire};
use crate::wire::{inbound, nullable, outbound, Nulls};
use crate::Extra;
use larder_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

// ============================================================================
// Review
// ============================================================================

/// A rating and comment left by a user on a recipe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    pub id: Option<EntityId>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    /// Reviewer
    pub user: Option<User>,
    /// Reviewed recipe
    pub recipe: Option<Recipe>,
    pub extra: Extra,
    pub nulls: Nulls,
}

impl Review {
    /// Create a draft review with a rating and comment
    pub fn new(rating: i32, comment: impl Into<String>) -> Self {
        Self {
            rating: Some(rating),
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the reviewer
    pub fn by(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the reviewed recipe
    pub fn of(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    /// Check if the rating is within the accepted range
    pub fn has_valid_rating(&self) -> bool {
        self.rating
            .is_some_and(|r| (MIN_RATING..=MAX_RATING).contains(&r))
    }
}

/// Wire record for [`Review`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWire {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<UserWire>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Option<RecipeWire>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for Review {
    const NAME: &'static str = "Review";
    type Wire = ReviewWire;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn to_wire(&self) -> ReviewWire {
        let nulls = &self.nulls;
        ReviewWire {
            id: outbound(self.id, "id", nulls),
            rating: outbound(self.rating, "rating", nulls),
            comment: outbound(self.comment.clone(), "comment", nulls),
            user: outbound(self.user.as_ref().map(Entity::to_wire), "user", nulls),
            recipe: outbound(self.recipe.as_ref().map(Entity::to_wire), "recipe", nulls),
            extra: self.extra.clone(),
        }
    }

    fn from_wire(wire: ReviewWire) -> Self {
        let mut nulls = Nulls::new();
        Self {
            id: inbound(wire.id, "id", &mut nulls),
            rating: inbound(wire.rating, "rating", &mut nulls),
            comment: inbound(wire.comment, "comment", &mut nulls),
            user: inbound(wire.user, "user", &mut nulls).map(User::from_wire),
            recipe: inbound(wire.recipe, "recipe", &mut nulls).map(Recipe::from_wire),
            extra: wire.extra,
            nulls,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
