//! Blog posts

use crate::user::{User, UserWire};
use crate::wire::{inbound, nullable, outbound, Nulls};
use crate::Extra;
use chrono::{DateTime, Utc};
use larder_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// A dated post written by a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: Option<EntityId>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Publication time; the wire form is an ISO-8601 timestamp
    pub date: Option<DateTime<Utc>>,
    pub user: Option<User>,
    pub extra: Extra,
    pub nulls: Nulls,
}

impl Post {
    /// Create a draft post
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the publication time
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Wire record for [`Post`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWire {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<UserWire>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Entity for Post {
    const NAME: &'static str = "Post";
    type Wire = PostWire;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn to_wire(&self) -> PostWire {
        let nulls = &self.nulls;
        PostWire {
            id: outbound(self.id, "id", nulls),
            title: outbound(self.title.clone(), "title", nulls),
            content: outbound(self.content.clone(), "content", nulls),
            date: outbound(self.date, "date", nulls),
            user: outbound(self.user.as_ref().map(Entity::to_wire), "user", nulls),
            extra: self.extra.clone(),
        }
    }

    fn from_wire(wire: PostWire) -> Self {
        let mut nulls = Nulls::new();
        Self {
            id: inbound(wire.id, "id", &mut nulls),
            title: inbound(wire.title, "title", &mut nulls),
            content: inbound(wire.content, "content", &mut nulls),
            date: inbound(wire.date, "date", &mut nulls),
            user: inbound(wire.user, "user", &mut nulls).map(User::from_wire),
            extra: wire.extra,
            nulls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_post_date_parses_from_offset_timestamp() {
        let wire: PostWire = serde_json::from_value(json!({
            "id": 2,
            "title": "Spring menu",
            "date": "2018-03-01T10:15:00+01:00"
        }))
        .unwrap();
        let post = Post::from_wire(wire);
        assert_eq!(
            post.date,
            Some(Utc.with_ymd_and_hms(2018, 3, 1, 9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_post_date_serializes_as_utc() {
        let post = Post::new("Hello")
            .with_date(Utc.with_ymd_and_hms(2018, 3, 1, 9, 15, 0).unwrap());
        let json = serde_json::to_value(post.to_wire()).unwrap();
        assert_eq!(json["date"], json!("2018-03-01T09:15:00Z"));
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_unset_date_and_author_round_trip_as_null() {
        let server = json!({ "id": 6, "title": null, "date": null, "user": null, "content": "draft" });
        let post = Post::from_wire(serde_json::from_value(server.clone()).unwrap());
        assert_eq!(post.title, None);
        assert_eq!(post.date, None);
        assert_eq!(serde_json::to_value(post.to_wire()).unwrap(), server);
    }
}
