use crate::model::identity::ItemType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Expiring,
    LowStock,
    PendingWaste,
}

/// One entry of the notifications dropdown.
///
/// `link` points at the list page pre-filtered on the item's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub link: String,
}

impl Notification {
    /// List and search text the link opens, e.g. `/waste?search=Glass`.
    pub fn target(&self) -> Option<(ItemType, String)> {
        let (path, query) = self.link.split_once('?').unwrap_or((self.link.as_str(), ""));
        let item_type = path.trim_start_matches('/').parse().ok()?;
        let search = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("search="))
            .unwrap_or_default();
        Some((item_type, search.to_string()))
    }
}

/// Headline counters of the dashboard page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_waste: usize,
    pub total_chemicals: usize,
    pub expiring_chemicals: usize,
    pub pending_waste: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(link: &str) -> Notification {
        Notification {
            id: "exp-1".to_string(),
            kind: NotificationKind::Expiring,
            message: String::new(),
            link: link.to_string(),
        }
    }

    #[test]
    fn target_reads_list_and_search() {
        assert_eq!(
            notification("/chemicals?search=Acetone").target(),
            Some((ItemType::Chemical, "Acetone".to_string()))
        );
        assert_eq!(
            notification("/waste?search=Old paint").target(),
            Some((ItemType::Waste, "Old paint".to_string()))
        );
    }

    #[test]
    fn target_without_search_opens_the_full_list() {
        assert_eq!(
            notification("/waste").target(),
            Some((ItemType::Waste, String::new()))
        );
        assert_eq!(notification("/reports").target(), None);
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(notification("/waste")).unwrap();
        assert_eq!(json["type"], "expiring");
    }
}
