//! Editable and browsable records and the API routes that address them.

use blogdesk_api_types::{Category, EntityId, Post};
use serde::{Serialize, de::DeserializeOwned};

/// Fixed user-facing messages shown when an editor operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorMessages {
    pub load_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

/// A single addressable record that can be loaded, edited, and deleted.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human label used in logs.
    const KIND: &'static str;
    const MESSAGES: EditorMessages;

    fn id(&self) -> &EntityId;

    fn get_path(id: &EntityId) -> String;
    fn update_path(id: &EntityId) -> String;
    fn delete_path(id: &EntityId) -> String;
}

impl Entity for Post {
    const KIND: &'static str = "post";
    const MESSAGES: EditorMessages = EditorMessages {
        load_failed: "Failed to fetch the post data.",
        update_failed: "Failed to update the post.",
        delete_failed: "Failed to delete the post.",
    };

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn get_path(id: &EntityId) -> String {
        format!("posts/getID/{id}")
    }

    fn update_path(id: &EntityId) -> String {
        format!("posts/updatepost/{id}")
    }

    fn delete_path(id: &EntityId) -> String {
        format!("posts/delpost/{id}")
    }
}

impl Entity for Category {
    const KIND: &'static str = "category";
    const MESSAGES: EditorMessages = EditorMessages {
        load_failed: "Failed to load data",
        update_failed: "Failed to update category",
        delete_failed: "Failed to delete category",
    };

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn get_path(id: &EntityId) -> String {
        format!("category/getcategory/{id}")
    }

    fn update_path(id: &EntityId) -> String {
        format!("category/updatecategory/{id}")
    }

    fn delete_path(id: &EntityId) -> String {
        format!("category/delcategory/{id}")
    }
}

/// Records that can be searched and filtered in the collection browser.
pub trait Browsable {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;

    /// Case-insensitive substring match on title or description.
    fn matches_query(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title().to_lowercase().contains(needle_lower)
            || self.description().to_lowercase().contains(needle_lower)
    }
}

impl Browsable for Post {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}
