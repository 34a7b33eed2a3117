use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored record.
///
/// The API is inconsistent about whether ids are numbers or strings, so the
/// identifier keeps whichever shape it was read in and writes it back the same
/// way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl EntityId {
    /// Compare ids by their path representation, ignoring the JSON shape.
    pub fn same_as(&self, other: &EntityId) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.trim().to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_wire_shape() {
        let numeric: EntityId = serde_json::from_str("5").expect("numeric id");
        let textual: EntityId = serde_json::from_str("\"5\"").expect("text id");

        assert_eq!(serde_json::to_string(&numeric).expect("encode"), "5");
        assert_eq!(serde_json::to_string(&textual).expect("encode"), "\"5\"");
        assert!(numeric.same_as(&textual));
    }

    #[test]
    fn blank_text_is_blank() {
        assert!(EntityId::from("   ").is_blank());
        assert!(!EntityId::from(0).is_blank());
    }
}
