//! User accounts
//!
//! Users are managed by the account service, but recipes, posts, and
//! reviews reference them, so dialogs load the user list to populate
//! their owner selectors.

use crate::wire::{inbound, nullable, outbound, Nulls};
use crate::Extra;
use larder_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

// ============================================================================
// User
// ============================================================================

/// An application account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    /// Server-assigned id
    pub id: Option<EntityId>,

    /// Unique login name
    pub login: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,

    /// Server fields not modelled here (authorities, audit columns, ...)
    pub extra: Extra,

    /// Named fields the server sent as `null`
    pub nulls: Nulls,
}

impl User {
    /// Create a draft user with the given login
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            ..Self::default()
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// "First Last", falling back to the login when no name is set
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.login.clone().unwrap_or_default(),
        }
    }
}

/// Wire record for [`User`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub login: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for User {
    const NAME: &'static str = "User";
    type Wire = UserWire;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn to_wire(&self) -> UserWire {
        let nulls = &self.nulls;
        UserWire {
            id: outbound(self.id, "id", nulls),
            login: outbound(self.login.clone(), "login", nulls),
            first_name: outbound(self.first_name.clone(), "firstName", nulls),
            last_name: outbound(self.last_name.clone(), "lastName", nulls),
            email: outbound(self.email.clone(), "email", nulls),
            extra: self.extra.clone(),
        }
    }

    fn from_wire(wire: UserWire) -> Self {
        let mut nulls = Nulls::new();
        Self {
            id: inbound(wire.id, "id", &mut nulls),
            login: inbound(wire.login, "login", &mut nulls),
            first_name: inbound(wire.first_name, "firstName", &mut nulls),
            last_name: inbound(wire.last_name, "lastName", &mut nulls),
            email: inbound(wire.email, "email", &mut nulls),
            extra: wire.extra,
            nulls,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
