use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    #[serde(default, deserialize_with = "crate::string_or_null")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of `category/getAll`; only the name is used as a filter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    #[serde(default, deserialize_with = "crate::string_or_null")]
    pub name: String,
}

/// Body of `category/addcategory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}
