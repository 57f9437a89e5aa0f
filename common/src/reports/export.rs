use crate::model::identity::ItemType;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No data found for the selected criteria.")]
    Empty,
    #[error("Failed to generate report: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

/// Inclusive range of creation days. An open end does not restrict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Records without a creation time only pass an unbounded range.
    pub fn contains(&self, created_at: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(day) = created_at.map(|c| c.date_naive()) else {
            return false;
        };
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Anything that can be written as one report line.
pub trait Exportable: Serialize {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl Exportable for crate::model::chemical::Chemical {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Exportable for crate::model::waste::Waste {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Writes the records created within `range` as CSV, header first.
pub fn export_csv<T: Exportable>(records: &[T], range: DateRange) -> Result<String, ExportError> {
    let selected: Vec<&T> = records
        .iter()
        .filter(|record| range.contains(record.created_at()))
        .collect();
    if selected.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &selected {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.to_string()))?;
    info!("Exported {} of {} record(s)", selected.len(), records.len());
    String::from_utf8(bytes).map_err(|err| ExportError::Csv(err.to_string()))
}

pub fn report_file_name(item_type: ItemType) -> String {
    format!("{}_report.csv", item_type.collection())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::waste::Waste;

    fn waste() -> Vec<Waste> {
        serde_json::from_str(
            r#"[
                {"id":"w1","name":"Paper, mixed","category":"Recyclable","quantity":1.5,"status":"pending","created_at":"2024-01-02T08:00:00Z"},
                {"id":"w2","name":"Glass","category":"Recyclable","quantity":2,"status":"disposed","created_at":"2024-02-10T08:00:00Z"},
                {"id":"w3","name":"Cells","category":"Electronic","quantity":1,"status":"pending"}
            ]"#,
        )
        .unwrap()
    }

    fn day(text: &str) -> Option<NaiveDate> {
        Some(text.parse().unwrap())
    }

    #[test]
    fn unbounded_export_writes_header_and_every_record() {
        let csv = export_csv(&waste(), DateRange::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "id,name,category,quantity,collection_date,status,location,created_at"
        );
        assert!(lines[1].starts_with("w1,\"Paper, mixed\",Recyclable,1.5,,pending,,"));
    }

    #[test]
    fn range_is_inclusive_and_skips_undated_records() {
        let range = DateRange {
            from: day("2024-01-02"),
            to: day("2024-01-31"),
        };
        let csv = export_csv(&waste(), range).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("w1,"));

        let open_end = DateRange {
            from: day("2024-02-10"),
            to: None,
        };
        let csv = export_csv(&waste(), open_end).unwrap();
        assert!(csv.contains("w2,"));
        assert!(!csv.contains("w3,"));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let range = DateRange {
            from: day("2030-01-01"),
            to: day("2030-12-31"),
        };
        let err = export_csv(&waste(), range).unwrap_err();
        assert_eq!(err.to_string(), "No data found for the selected criteria.");
        assert_eq!(export_csv::<Waste>(&[], DateRange::default()), Err(ExportError::Empty));
    }

    #[test]
    fn file_name_uses_collection() {
        assert_eq!(report_file_name(ItemType::Chemical), "chemicals_report.csv");
        assert_eq!(report_file_name(ItemType::Waste), "waste_report.csv");
    }
}
