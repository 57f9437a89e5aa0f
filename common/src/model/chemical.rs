use crate::model::form::{
    optional_amount, optional_date, optional_text, required_amount, required_text, FieldErrors,
};
use crate::model::identity::{IdentityToken, ItemType};
use crate::model::import::ImportRow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const CHEMICAL_CATEGORIES: [&str; 7] = [
    "Acid",
    "Base",
    "Solvent",
    "Reagent",
    "Buffer",
    "Catalyst",
    "Indicator",
];

/// Columns a chemical CSV import must fill on every row.
pub const CHEMICAL_REQUIRED_FIELDS: [&str; 3] = ["name", "category", "quantity"];

/// A chemical inventory record as returned by `GET /api/chemicals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sds_link: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Chemical {
    pub fn identity(&self) -> IdentityToken {
        IdentityToken::new(self.id.clone(), ItemType::Chemical, self.name.clone())
    }

    /// Expires on or before `today + days`. Already expired items count too.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        match self.expiration_date {
            Some(date) => date <= today + chrono::Duration::days(days),
            None => false,
        }
    }

    pub fn is_low_on_stock(&self) -> bool {
        self.reorder_level
            .is_some_and(|reorder_level| self.quantity <= reorder_level)
    }
}

/// Body of `POST /api/chemicals` and `PUT /api/chemicals/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalCreate {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub sds_link: Option<String>,
    pub reorder_level: Option<f64>,
}

/// Raw values of the chemical form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemicalInput {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub expiration_date: String,
    pub location: String,
    pub sds_link: String,
    pub reorder_level: String,
}

impl ChemicalInput {
    /// Pre-fills the edit form from an existing record.
    pub fn from_record(chemical: &Chemical) -> Self {
        Self {
            name: chemical.name.clone(),
            category: chemical.category.clone(),
            quantity: chemical.quantity.to_string(),
            expiration_date: chemical
                .expiration_date
                .map(|d| d.format(super::form::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            location: chemical.location.clone().unwrap_or_default(),
            sds_link: chemical.sds_link.clone().unwrap_or_default(),
            reorder_level: chemical
                .reorder_level
                .map(|r| r.to_string())
                .unwrap_or_default(),
        }
    }

    /// Reads the known chemical columns of an imported row. Unknown columns
    /// are ignored, missing ones stay empty.
    pub fn from_import_row(row: &ImportRow) -> Self {
        let cell = |column: &str| row.text(column).unwrap_or_default();
        Self {
            name: cell("name"),
            category: cell("category"),
            quantity: cell("quantity"),
            expiration_date: cell("expiration_date"),
            location: cell("location"),
            sds_link: cell("sds_link"),
            reorder_level: cell("reorder_level"),
        }
    }

    pub fn validate(&self) -> Result<ChemicalCreate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", "Name", &self.name);
        let category = required_text(&mut errors, "category", "Category", &self.category);
        let quantity = required_amount(&mut errors, "quantity", "Quantity", &self.quantity);
        let reorder_level = optional_amount(
            &mut errors,
            "reorder_level",
            "Reorder level",
            &self.reorder_level,
        );
        let expiration_date = optional_date(
            &mut errors,
            "expiration_date",
            "Expiration date",
            &self.expiration_date,
        );

        errors.into_result(ChemicalCreate {
            name,
            category,
            quantity,
            expiration_date,
            location: optional_text(&self.location),
            sds_link: optional_text(&self.sds_link),
            reorder_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::import::CellValue;

    fn input() -> ChemicalInput {
        ChemicalInput {
            name: " Hydrochloric Acid ".into(),
            category: "Acid".into(),
            quantity: "12.5".into(),
            expiration_date: "2025-03-01".into(),
            location: "".into(),
            sds_link: "https://example.com/sds.pdf".into(),
            reorder_level: "".into(),
        }
    }

    #[test]
    fn valid_form_produces_typed_payload() {
        let payload = input().validate().unwrap();
        assert_eq!(payload.name, "Hydrochloric Acid");
        assert_eq!(payload.quantity, 12.5);
        assert_eq!(payload.expiration_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(payload.location, None);
        assert_eq!(payload.reorder_level, None);
    }

    #[test]
    fn invalid_form_reports_every_field() {
        let form = ChemicalInput {
            name: "  ".into(),
            quantity: "-1".into(),
            expiration_date: "03/01/2025".into(),
            reorder_level: "lots".into(),
            ..input()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("reorder_level").is_some());
        assert!(errors.get("expiration_date").is_some());
    }

    #[test]
    fn form_reads_coerced_import_rows() {
        let row: ImportRow = vec![
            ("name", CellValue::Text("Acetone".into())),
            ("category", CellValue::Text("Solvent".into())),
            ("quantity", CellValue::Number(4.0)),
            ("supplier", CellValue::Text("ACME".into())),
        ]
        .into_iter()
        .collect();

        let payload = ChemicalInput::from_import_row(&row).validate().unwrap();
        assert_eq!(payload.name, "Acetone");
        assert_eq!(payload.quantity, 4.0);
    }

    #[test]
    fn numeric_ids_deserialize_as_text() {
        let chemical: Chemical = serde_json::from_str(
            r#"{"id":42,"name":"Ethanol","category":"Solvent","quantity":3,"reorder_level":5}"#,
        )
        .unwrap();
        assert_eq!(chemical.id, "42");
        assert!(chemical.is_low_on_stock());
        assert_eq!(chemical.identity().item_type, ItemType::Chemical);
    }

    #[test]
    fn expiry_window_includes_past_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut chemical: Chemical = serde_json::from_str(
            r#"{"id":"c1","name":"Ethanol","category":"Solvent","quantity":3}"#,
        )
        .unwrap();
        assert!(!chemical.expires_within(today, 30));

        chemical.expiration_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert!(chemical.expires_within(today, 30));
        chemical.expiration_date = NaiveDate::from_ymd_opt(2024, 7, 2);
        assert!(!chemical.expires_within(today, 30));
        chemical.expiration_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(chemical.expires_within(today, 30));
    }
}
