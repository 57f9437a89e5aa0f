//! Filtering of the chemical and waste lists.
//!
//! The same criteria are applied locally (scanned labels, offline previews)
//! and sent to the data API as query parameters.

use crate::model::chemical::Chemical;
use crate::model::identity::IdentityToken;
use crate::model::waste::{Waste, WasteStatus};
use chrono::NaiveDate;
use log::debug;

/// Days ahead that count as "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-insensitive substring of the record name.
    pub search: String,
    pub category: Option<String>,
    pub status: Option<WasteStatus>,
    pub expiring_soon: bool,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self == &ListFilter::default()
    }

    pub fn clear(&mut self) {
        *self = ListFilter::default();
    }

    /// Narrows the list down to the item a scanned label identifies.
    ///
    /// Searching by name matches what the list search box does; labels
    /// printed without a name fall back to the id.
    pub fn apply_identity(&mut self, token: &IdentityToken) {
        let search = if token.name.trim().is_empty() {
            token.id.clone()
        } else {
            token.name.clone()
        };
        debug!("Filtering {} list by scanned '{}'", token.item_type, search);
        *self = ListFilter {
            search,
            ..ListFilter::default()
        };
    }

    pub fn matches_chemical(&self, chemical: &Chemical, today: NaiveDate) -> bool {
        self.matches_name(&chemical.name)
            && self.matches_category(&chemical.category)
            && (!self.expiring_soon || chemical.expires_within(today, EXPIRY_WINDOW_DAYS))
    }

    pub fn matches_waste(&self, waste: &Waste) -> bool {
        self.matches_name(&waste.name)
            && self.matches_category(&waste.category)
            && self.status.is_none_or(|status| status == waste.status)
    }

    /// Non-empty criteria as `(name, value)` query parameters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.trim().to_string()));
        }
        if self.expiring_soon {
            pairs.push(("expiring_soon", "true".to_string()));
        }
        pairs
    }

    fn matches_name(&self, name: &str) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || name.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, category: &str) -> bool {
        match self.category.as_deref() {
            None | Some("") => true,
            Some(wanted) => wanted == category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identity::ItemType;

    fn chemical(name: &str, category: &str, expires: Option<&str>) -> Chemical {
        Chemical {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: category.to_string(),
            quantity: 1.0,
            expiration_date: expires.map(|d| d.parse().unwrap()),
            location: None,
            sds_link: None,
            reorder_level: None,
            created_at: None,
        }
    }

    fn waste(name: &str, status: WasteStatus) -> Waste {
        Waste {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: "General".to_string(),
            quantity: 1.0,
            collection_date: None,
            status,
            location: None,
            created_at: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ListFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches_chemical(&chemical("Ethanol", "Solvent", None), today()));
        assert!(filter.matches_waste(&waste("Paper", WasteStatus::Disposed)));
        assert!(filter.query_pairs().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = ListFilter {
            search: "  ACID ".to_string(),
            ..ListFilter::default()
        };
        assert!(filter.matches_chemical(&chemical("Hydrochloric acid", "Acid", None), today()));
        assert!(!filter.matches_chemical(&chemical("Acetone", "Solvent", None), today()));
    }

    #[test]
    fn expiring_soon_uses_thirty_day_window() {
        let filter = ListFilter {
            expiring_soon: true,
            ..ListFilter::default()
        };
        assert!(filter.matches_chemical(&chemical("A", "Acid", Some("2024-07-01")), today()));
        assert!(!filter.matches_chemical(&chemical("B", "Acid", Some("2024-07-02")), today()));
        assert!(!filter.matches_chemical(&chemical("C", "Acid", None), today()));
    }

    #[test]
    fn status_and_category_are_exact() {
        let filter = ListFilter {
            status: Some(WasteStatus::Pending),
            category: Some("General".to_string()),
            ..ListFilter::default()
        };
        assert!(filter.matches_waste(&waste("Paper", WasteStatus::Pending)));
        assert!(!filter.matches_waste(&waste("Paper", WasteStatus::Collected)));
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("category", "General".to_string()),
                ("status", "pending".to_string())
            ]
        );
    }

    #[test]
    fn scanned_identity_replaces_criteria() {
        let mut filter = ListFilter {
            category: Some("Acid".to_string()),
            expiring_soon: true,
            ..ListFilter::default()
        };
        filter.apply_identity(&IdentityToken::new("c9", ItemType::Chemical, "Acetone"));
        assert_eq!(
            filter,
            ListFilter {
                search: "Acetone".to_string(),
                ..ListFilter::default()
            }
        );

        filter.apply_identity(&IdentityToken::new("c10", ItemType::Chemical, ""));
        assert_eq!(filter.search, "c10");
    }
}
