//! The create/edit form of a single chemical or waste record.
//!
//! [`RecordForm`] wraps the typed inputs so one dialog can drive either kind
//! of record: it lists the fields to render, reads and writes them by name,
//! and validates into the payload sent to the data API.

use crate::model::chemical::{Chemical, ChemicalCreate, ChemicalInput, CHEMICAL_CATEGORIES};
use crate::model::form::FieldErrors;
use crate::model::identity::ItemType;
use crate::model::waste::{Waste, WasteCreate, WasteInput, WasteStatus, WASTE_CATEGORIES};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Url,
    Category,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FormField {
    FormField {
        name,
        label,
        kind,
        required,
    }
}

const CHEMICAL_FIELDS: [FormField; 7] = [
    field("name", "Name", FieldKind::Text, true),
    field("category", "Category", FieldKind::Category, true),
    field("quantity", "Quantity (L/g)", FieldKind::Number, true),
    field("reorder_level", "Re-order Level", FieldKind::Number, false),
    field("expiration_date", "Expiration Date", FieldKind::Date, false),
    field("location", "Location", FieldKind::Text, false),
    field("sds_link", "SDS Link", FieldKind::Url, false),
];

const WASTE_FIELDS: [FormField; 6] = [
    field("name", "Name", FieldKind::Text, true),
    field("category", "Category", FieldKind::Category, true),
    field("quantity", "Quantity", FieldKind::Number, true),
    field("status", "Status", FieldKind::Status, true),
    field("collection_date", "Collection Date", FieldKind::Date, false),
    field("location", "Location", FieldKind::Text, false),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordForm {
    Chemical(ChemicalInput),
    Waste(WasteInput),
}

/// Validated body of `POST /api/{collection}` and `PUT /api/{collection}/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordPayload {
    Chemical(ChemicalCreate),
    Waste(WasteCreate),
}

impl RecordForm {
    /// An empty form. New waste records start as `pending`.
    pub fn blank(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Chemical => RecordForm::Chemical(ChemicalInput::default()),
            ItemType::Waste => RecordForm::Waste(WasteInput {
                status: WasteStatus::default().to_string(),
                ..WasteInput::default()
            }),
        }
    }

    pub fn for_chemical(chemical: &Chemical) -> Self {
        RecordForm::Chemical(ChemicalInput::from_record(chemical))
    }

    pub fn for_waste(waste: &Waste) -> Self {
        RecordForm::Waste(WasteInput::from_record(waste))
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            RecordForm::Chemical(_) => ItemType::Chemical,
            RecordForm::Waste(_) => ItemType::Waste,
        }
    }

    /// Fields in display order.
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            RecordForm::Chemical(_) => &CHEMICAL_FIELDS,
            RecordForm::Waste(_) => &WASTE_FIELDS,
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            RecordForm::Chemical(_) => &CHEMICAL_CATEGORIES,
            RecordForm::Waste(_) => &WASTE_CATEGORIES,
        }
    }

    fn slot(&mut self, name: &str) -> Option<&mut String> {
        match self {
            RecordForm::Chemical(input) => match name {
                "name" => Some(&mut input.name),
                "category" => Some(&mut input.category),
                "quantity" => Some(&mut input.quantity),
                "expiration_date" => Some(&mut input.expiration_date),
                "location" => Some(&mut input.location),
                "sds_link" => Some(&mut input.sds_link),
                "reorder_level" => Some(&mut input.reorder_level),
                _ => None,
            },
            RecordForm::Waste(input) => match name {
                "name" => Some(&mut input.name),
                "category" => Some(&mut input.category),
                "quantity" => Some(&mut input.quantity),
                "collection_date" => Some(&mut input.collection_date),
                "status" => Some(&mut input.status),
                "location" => Some(&mut input.location),
                _ => None,
            },
        }
    }

    /// Current text of `name`; empty for fields this form does not have.
    pub fn value(&self, name: &str) -> &str {
        match self {
            RecordForm::Chemical(input) => match name {
                "name" => input.name.as_str(),
                "category" => input.category.as_str(),
                "quantity" => input.quantity.as_str(),
                "expiration_date" => input.expiration_date.as_str(),
                "location" => input.location.as_str(),
                "sds_link" => input.sds_link.as_str(),
                "reorder_level" => input.reorder_level.as_str(),
                _ => "",
            },
            RecordForm::Waste(input) => match name {
                "name" => input.name.as_str(),
                "category" => input.category.as_str(),
                "quantity" => input.quantity.as_str(),
                "collection_date" => input.collection_date.as_str(),
                "status" => input.status.as_str(),
                "location" => input.location.as_str(),
                _ => "",
            },
        }
    }

    /// Stores `value` under `name`. Returns `false` for an unknown field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slot(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> Result<RecordPayload, FieldErrors> {
        match self {
            RecordForm::Chemical(input) => input.validate().map(RecordPayload::Chemical),
            RecordForm::Waste(input) => input.validate().map(RecordPayload::Waste),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_waste_form_starts_pending() {
        let form = RecordForm::blank(ItemType::Waste);
        assert_eq!(form.value("status"), "pending");
        assert_eq!(form.item_type(), ItemType::Waste);
        assert!(form.fields().iter().any(|f| f.kind == FieldKind::Status));
    }

    #[test]
    fn every_listed_field_is_settable() {
        for item_type in ItemType::ALL {
            let mut form = RecordForm::blank(item_type);
            for field in form.fields() {
                assert!(form.set(field.name, "x"), "{} on {}", field.name, item_type);
                assert_eq!(form.value(field.name), "x");
            }
            assert!(!form.set("supplier", "ACME"));
            assert_eq!(form.value("supplier"), "");
        }
    }

    #[test]
    fn edit_form_round_trips_a_record() {
        let chemical: Chemical = serde_json::from_str(
            r#"{"id":"c1","name":"Ethanol","category":"Solvent","quantity":3.5,"reorder_level":5,"expiration_date":"2025-01-31"}"#,
        )
        .unwrap();
        let form = RecordForm::for_chemical(&chemical);
        assert_eq!(form.value("expiration_date"), "2025-01-31");

        let RecordPayload::Chemical(payload) = form.validate().unwrap() else {
            panic!("expected a chemical payload");
        };
        assert_eq!(payload.name, "Ethanol");
        assert_eq!(payload.quantity, 3.5);
        assert_eq!(payload.reorder_level, Some(5.0));
    }

    #[test]
    fn errors_are_reported_per_field() {
        let mut form = RecordForm::blank(ItemType::Waste);
        form.set("name", "Batteries");
        form.set("quantity", "many");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity must be a number of at least 0")
        );
        assert_eq!(errors.get("name"), None);
    }

    #[test]
    fn payload_serializes_without_a_tag() {
        let mut form = RecordForm::blank(ItemType::Waste);
        form.set("name", "Glass");
        form.set("category", "Recyclable");
        form.set("quantity", "2");
        let json = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(json["name"], "Glass");
        assert_eq!(json["status"], "pending");
        assert!(json.get("Waste").is_none());
    }
}
