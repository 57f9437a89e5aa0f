use crate::model::form::{
    optional_date, optional_text, required_amount, required_text, FieldErrors,
};
use crate::model::identity::{IdentityToken, ItemType};
use crate::model::import::ImportRow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WASTE_CATEGORIES: [&str; 5] =
    ["Hazardous", "Recyclable", "Organic", "Electronic", "General"];

/// Columns a waste CSV import must fill on every row.
pub const WASTE_REQUIRED_FIELDS: [&str; 3] = ["name", "category", "quantity"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteStatus {
    #[default]
    Pending,
    Collected,
    Processed,
    Disposed,
}

impl WasteStatus {
    pub const ALL: [WasteStatus; 4] = [
        WasteStatus::Pending,
        WasteStatus::Collected,
        WasteStatus::Processed,
        WasteStatus::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteStatus::Pending => "pending",
            WasteStatus::Collected => "collected",
            WasteStatus::Processed => "processed",
            WasteStatus::Disposed => "disposed",
        }
    }
}

impl fmt::Display for WasteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WasteStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown waste status '{}'", s))
    }
}

/// A waste-disposal record as returned by `GET /api/waste`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waste {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    #[serde(default)]
    pub collection_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: WasteStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Waste {
    pub fn identity(&self) -> IdentityToken {
        IdentityToken::new(self.id.clone(), ItemType::Waste, self.name.clone())
    }
}

/// Body of `POST /api/waste` and `PUT /api/waste/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteCreate {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub collection_date: Option<NaiveDate>,
    pub status: WasteStatus,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WasteInput {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub collection_date: String,
    /// Empty means `pending`, which is what a new record starts as.
    pub status: String,
    pub location: String,
}

impl WasteInput {
    pub fn from_record(waste: &Waste) -> Self {
        Self {
            name: waste.name.clone(),
            category: waste.category.clone(),
            quantity: waste.quantity.to_string(),
            collection_date: waste
                .collection_date
                .map(|d| d.format(super::form::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: waste.status.to_string(),
            location: waste.location.clone().unwrap_or_default(),
        }
    }

    pub fn from_import_row(row: &ImportRow) -> Self {
        let cell = |column: &str| row.text(column).unwrap_or_default();
        Self {
            name: cell("name"),
            category: cell("category"),
            quantity: cell("quantity"),
            collection_date: cell("collection_date"),
            status: cell("status"),
            location: cell("location"),
        }
    }

    pub fn validate(&self) -> Result<WasteCreate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", "Name", &self.name);
        let category = required_text(&mut errors, "category", "Category", &self.category);
        let quantity = required_amount(&mut errors, "quantity", "Quantity", &self.quantity);
        let collection_date = optional_date(
            &mut errors,
            "collection_date",
            "Collection date",
            &self.collection_date,
        );
        let status = if self.status.trim().is_empty() {
            WasteStatus::default()
        } else {
            self.status.parse::<WasteStatus>().unwrap_or_else(|message: String| {
                errors.push("status", message);
                WasteStatus::default()
            })
        };

        errors.into_result(WasteCreate {
            name,
            category,
            quantity,
            collection_date,
            status,
            location: optional_text(&self.location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_status_defaults_to_pending() {
        let form = WasteInput {
            name: "Used solvent".into(),
            category: "Hazardous".into(),
            quantity: "20".into(),
            ..Default::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.status, WasteStatus::Pending);
        assert_eq!(payload.collection_date, None);
    }

    #[test]
    fn status_is_case_insensitive_and_checked() {
        let mut form = WasteInput {
            name: "Batteries".into(),
            category: "Electronic".into(),
            quantity: "3".into(),
            status: "Collected".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap().status, WasteStatus::Collected);

        form.status = "lost".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("status"), Some("unknown waste status 'lost'"));
    }

    #[test]
    fn record_status_defaults_when_missing() {
        let waste: Waste = serde_json::from_str(
            r#"{"id":"w1","name":"Paper","category":"Recyclable","quantity":1.5}"#,
        )
        .unwrap();
        assert_eq!(waste.status, WasteStatus::Pending);
        assert_eq!(WasteInput::from_record(&waste).status, "pending");
    }

    #[test]
    fn payload_serializes_status_lowercase() {
        let payload = WasteCreate {
            name: "Glass".into(),
            category: "Recyclable".into(),
            quantity: 2.0,
            collection_date: None,
            status: WasteStatus::Disposed,
            location: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "disposed");
    }
}
