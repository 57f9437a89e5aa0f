use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of an imported row.
///
/// Cells start out as the raw text read from the file. Validation replaces the
/// `quantity` cell with its numeric value when it parses; an unparseable value
/// stays `Text` so the preview shows exactly what the user uploaded.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// `true` for text that is empty after trimming. Numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(value) => CellValue::Number(value),
            Raw::Text(text) => CellValue::Text(text),
        })
    }
}

/// One data line of an uploaded CSV file, keyed by the header's column names.
///
/// Column order follows the header so previews and JSON payloads list the
/// columns the way the file did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow {
    cells: Vec<(String, CellValue)>,
}

impl ImportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`, replacing an earlier cell with the same name.
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, cell)) => *cell = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut CellValue> {
        self.cells
            .iter_mut()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Cell rendered as text, whatever its current type.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(ToString::to_string)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for ImportRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = ImportRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Serialize for ImportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ImportRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = ImportRow;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of column values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ImportRow, A::Error> {
                let mut row = ImportRow::new();
                while let Some((column, value)) = access.next_entry::<String, CellValue>()? {
                    row.insert(column, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// A problem found while validating one imported row.
///
/// `row_index` is the line number a spreadsheet user would see: the header is
/// line 1, so the first data row is reported as 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row_index: usize,
    pub message: String,
}

impl ValidationError {
    pub fn missing_fields(row_index: usize, fields: &[&str]) -> Self {
        Self {
            row_index,
            message: format!(
                "Row {}: Missing required fields - {}",
                row_index,
                fields.join(", ")
            ),
        }
    }

    pub fn invalid_quantity(row_index: usize) -> Self {
        Self {
            row_index,
            message: format!("Row {}: Invalid quantity value.", row_index),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_header_order_and_replaces_duplicates() {
        let mut row = ImportRow::new();
        row.insert("name", CellValue::Text("Acid".into()));
        row.insert("quantity", CellValue::Text("10".into()));
        row.insert("name", CellValue::Text("Base".into()));

        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "quantity"]);
        assert_eq!(row.text("name").as_deref(), Some("Base"));
    }

    #[test]
    fn row_serializes_as_object_in_column_order() {
        let row: ImportRow = vec![
            ("name", CellValue::Text("Acid".into())),
            ("quantity", CellValue::Number(2.5)),
            ("category", CellValue::Text("Acid".into())),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"name":"Acid","quantity":2.5,"category":"Acid"}"#);
    }

    #[test]
    fn row_deserializes_in_document_order() {
        let row: ImportRow =
            serde_json::from_str(r#"{"quantity":3,"name":"Base","notes":""}"#).unwrap();
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["quantity", "name", "notes"]
        );
        assert_eq!(row.get("quantity"), Some(&CellValue::Number(3.0)));
        assert!(row.get("notes").unwrap().is_blank());
    }

    #[test]
    fn numbers_display_without_trailing_zeroes() {
        assert_eq!(CellValue::Number(10.0).to_string(), "10");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
    }

    #[test]
    fn whitespace_text_counts_as_blank() {
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(!CellValue::Text(" x ".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }
}
