use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two kinds of inventory record that can carry a QR label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Chemical,
    Waste,
}

impl ItemType {
    pub const ALL: [ItemType; 2] = [ItemType::Chemical, ItemType::Waste];

    /// Value used in the QR payload's `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Chemical => "chemical",
            ItemType::Waste => "waste",
        }
    }

    /// Collection segment used by the data API and in permission names.
    pub fn collection(&self) -> &'static str {
        match self {
            ItemType::Chemical => "chemicals",
            ItemType::Waste => "waste",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item type '{0}'")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    /// Accepts the payload value (`chemical`) as well as the collection name
    /// (`chemicals`), which is what URL paths carry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chemical" | "chemicals" => Ok(ItemType::Chemical),
            "waste" => Ok(ItemType::Waste),
            other => Err(UnknownItemType(other.to_string())),
        }
    }
}

/// Identity of one physical inventory item, as printed in its QR label.
///
/// The JSON form is exactly `{"id": ..., "type": ..., "name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityToken {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
}

impl IdentityToken {
    pub fn new(id: impl Into<String>, item_type: ItemType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type,
            name: name.into(),
        }
    }
}
