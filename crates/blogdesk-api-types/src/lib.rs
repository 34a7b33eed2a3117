//! Request and response shapes spoken by the Blogdesk blogging API.
//!
//! Records preserve fields they do not model so that an edited record can be
//! sent back to the server without losing data.

mod auth;
mod categories;
mod ids;
mod posts;

pub use auth::Credentials;
pub use categories::{Category, CategoryDraft, CategoryOption};
pub use ids::EntityId;
pub use posts::{Post, PostDraft};

use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate counters returned by `analysis/analytics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub total: u64,
}

/// Response of the image upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(default)]
    pub location: Option<String>,
}

/// Read a string field that the API may send as `null`.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
