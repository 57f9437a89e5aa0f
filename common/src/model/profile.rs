use crate::model::identity::ItemType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Capability names granted to roles by the hosted backend.
pub mod capabilities {
    pub const CHEMICALS_CREATE: &str = "chemicals:create";
    pub const CHEMICALS_UPDATE: &str = "chemicals:update";
    pub const CHEMICALS_DELETE: &str = "chemicals:delete";
    pub const WASTE_CREATE: &str = "waste:create";
    pub const WASTE_UPDATE: &str = "waste:update";
    pub const WASTE_DELETE: &str = "waste:delete";
    pub const USERS_MANAGE: &str = "users:manage";
}

/// Record-level actions gated by a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Builds the capability name for `action` on records of `item_type`,
/// e.g. `waste:delete`.
pub fn capability(item_type: ItemType, action: Action) -> String {
    format!("{}:{}", item_type.collection(), action.as_str())
}

/// Immutable set of capability tokens taken from one profile fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(capabilities.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.0.contains(capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        f.write_str(&names.join(", "))
    }
}

/// Response of `GET /api/user/profile`.
///
/// Only `permissions` drives behaviour; the rest is shown in the header bar.
/// A profile without a `permissions` array grants nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}
