use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::EntityId;

/// A blog post as served by `posts/getID/{id}` and `posts/getAll`.
///
/// `description` may hold rich-text markup and is carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    #[serde(default, deserialize_with = "crate::string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::string_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::string_or_null")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Calendar date of the post, accepting full RFC 3339 timestamps or a
    /// leading `YYYY-MM-DD`.
    pub fn published_on(&self) -> Option<Date> {
        let raw = self.date.as_deref()?.trim();
        if let Ok(stamp) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(stamp.date());
        }
        let day = raw.get(..10)?;
        Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
    }
}

/// Body of `posts/addpost`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub category: String,
}
