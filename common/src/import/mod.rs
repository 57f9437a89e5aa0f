//! CSV bulk import: parsing, row validation and the importer session.
//!
//! The flow is file → [`parse_rows`] → [`validate_rows`] → preview →
//! [`ImportSession::submit`]. Parsing and validation never touch the network;
//! the only side effect of the whole pipeline is the single bulk-create call
//! made on submission.
//!
//! Row numbers in messages are spreadsheet line numbers: the header is line 1,
//! so the first data row is reported as `Row 2`.

mod session;

pub use session::{ImportConfig, ImportSession, SubmitFailure};

use crate::model::import::{CellValue, ImportRow, ValidationError};
use log::debug;
use std::collections::HashSet;
use std::io::Read;
use thiserror::Error;

/// Column that is coerced to a number during validation.
pub const QUANTITY_FIELD: &str = "quantity";

/// Offset between a zero-based data row index and its displayed line number.
const ROW_NUMBER_OFFSET: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Could not read the CSV file: {0}")]
    Parse(String),
    #[error("The CSV file has no header row.")]
    MissingHeader,
    #[error("Please fix the errors before importing.")]
    HasErrors { errors: usize },
    #[error("Select a CSV file to import first.")]
    NothingLoaded,
    #[error("An import is already in progress.")]
    InFlight,
    #[error("Import failed: {0}")]
    Submit(String),
    #[error("{created} items were imported before the failure; {remaining} remain. {reason}")]
    PartiallySubmitted {
        created: usize,
        remaining: usize,
        reason: String,
    },
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

/// Result of reading and validating one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub rows: Vec<ImportRow>,
    pub errors: Vec<ValidationError>,
}

/// Reads a comma-separated file whose first line names the columns.
///
/// Every following non-empty line becomes one row, in file order. Lines
/// shorter than the header leave the trailing columns out of the row; cells
/// beyond the header are dropped. A repeated column name gets a numeric
/// suffix (`name`, `name_1`) so no cell is lost.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(
        reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, title)| normalize_header(idx, title))
            .collect(),
    );
    if headers.iter().all(String::is_empty) {
        return Err(ImportError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_empty_line(&record) {
            continue;
        }
        if record.len() > headers.len() {
            debug!(
                "Ignoring {} cell(s) beyond the header on line {}",
                record.len() - headers.len(),
                record.position().map_or(0, |p| p.line())
            );
        }
        let row: ImportRow = headers
            .iter()
            .zip(record.iter())
            .map(|(title, value)| (title.clone(), CellValue::Text(value.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Checks every row against `required_fields` and coerces `quantity` in place.
///
/// A row produces at most one "missing fields" error listing all of its
/// missing columns in `required_fields` order, followed by at most one
/// "invalid quantity" error. A quantity that does not parse is left as text.
pub fn validate_rows<S: AsRef<str>>(
    rows: &mut [ImportRow],
    required_fields: &[S],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (idx, row) in rows.iter_mut().enumerate() {
        let row_number = idx + ROW_NUMBER_OFFSET;

        let missing: Vec<&str> = required_fields
            .iter()
            .map(AsRef::as_ref)
            .filter(|field| row.get(field).is_none_or(CellValue::is_blank))
            .collect();
        if !missing.is_empty() {
            errors.push(ValidationError::missing_fields(row_number, &missing));
        }

        if !coerce_quantity(row) {
            errors.push(ValidationError::invalid_quantity(row_number));
        }
    }
    errors
}

/// Parses and validates in one step.
pub fn read_batch<R: Read, S: AsRef<str>>(
    reader: R,
    required_fields: &[S],
) -> Result<ImportReport, ImportError> {
    let mut rows = parse_rows(reader)?;
    let errors = validate_rows(&mut rows, required_fields);
    Ok(ImportReport { rows, errors })
}

/// Replaces a textual quantity by its value. Returns `false` only when a
/// non-blank quantity is not a finite number.
fn coerce_quantity(row: &mut ImportRow) -> bool {
    let Some(cell) = row.get_mut(QUANTITY_FIELD) else {
        return true;
    };
    let parsed = match cell {
        CellValue::Text(raw) if !raw.trim().is_empty() => raw.trim().parse::<f64>().ok(),
        _ => return true,
    };
    match parsed.filter(|value| value.is_finite()) {
        Some(value) => {
            *cell = CellValue::Number(value);
            true
        }
        None => false,
    }
}

fn normalize_header(idx: usize, title: &str) -> String {
    let title = if idx == 0 {
        title.trim_start_matches('\u{feff}')
    } else {
        title
    };
    title.trim().to_string()
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());
    for title in headers {
        let mut candidate = title.clone();
        let mut suffix = 1;
        while !title.is_empty() && seen.contains(&candidate) {
            candidate = format!("{}_{}", title, suffix);
            suffix += 1;
        }
        if candidate != title {
            debug!("Renamed duplicate column '{}' to '{}'", title, candidate);
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

fn is_empty_line(record: &csv::StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, required: &[&str]) -> ImportReport {
        read_batch(text.as_bytes(), required).unwrap()
    }

    #[test]
    fn rows_follow_file_order_and_skip_blank_lines() {
        let report = read("name,quantity\nAcid,10\n\nBase,5\n\nSalt,1\n", &[]);
        let names: Vec<_> = report.rows.iter().map(|r| r.text("name").unwrap()).collect();
        assert_eq!(names, vec!["Acid", "Base", "Salt"]);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn missing_required_field_is_reported_with_display_row() {
        let report = read("name,quantity\nAcid,10\nBase,\n", &["quantity"]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.errors,
            vec![ValidationError {
                row_index: 3,
                message: "Row 3: Missing required fields - quantity".to_string(),
            }]
        );
    }

    #[test]
    fn missing_fields_are_grouped_in_declared_order() {
        let report = read(
            "name,category,quantity\n ,  ,\n",
            &["quantity", "name", "category"],
        );
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].message,
            "Row 2: Missing required fields - quantity, name, category"
        );
    }

    #[test]
    fn absent_column_counts_as_missing() {
        let report = read("name\nAcid\n", &["name", "category"]);
        assert_eq!(
            report.errors[0].message,
            "Row 2: Missing required fields - category"
        );
    }

    #[test]
    fn short_rows_lack_trailing_columns() {
        let report = read("name,category,quantity\nAcid\n", &["category"]);
        assert_eq!(report.rows[0].len(), 1);
        assert_eq!(report.errors[0].row_index, 2);
    }

    #[test]
    fn quantity_is_coerced_in_place() {
        let report = read("name,quantity\nAcid, 12.5 \n", &[]);
        assert_eq!(
            report.rows[0].get("quantity"),
            Some(&CellValue::Number(12.5))
        );
    }

    #[test]
    fn invalid_quantity_keeps_original_text() {
        let report = read("name,quantity\nAcid,ten\nBase,NaN\n", &[]);
        assert_eq!(
            report.rows[0].get("quantity"),
            Some(&CellValue::Text("ten".into()))
        );
        assert_eq!(
            report.rows[1].get("quantity"),
            Some(&CellValue::Text("NaN".into()))
        );
        let messages: Vec<_> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Row 2: Invalid quantity value.",
                "Row 3: Invalid quantity value."
            ]
        );
    }

    #[test]
    fn quantity_rejects_units_and_infinity_but_takes_exponents() {
        let report = read("name,quantity\nAcid,10kg\nBase,Infinity\nSalt,1e3\n", &[]);
        assert_eq!(
            report.rows[2].get("quantity"),
            Some(&CellValue::Number(1000.0))
        );
        let messages: Vec<_> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Row 2: Invalid quantity value.",
                "Row 3: Invalid quantity value."
            ]
        );
    }

    #[test]
    fn row_can_report_missing_fields_and_bad_quantity() {
        let report = read("name,quantity\n,abc\n", &["name"]);
        let messages: Vec<_> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Row 2: Missing required fields - name",
                "Row 2: Invalid quantity value."
            ]
        );
    }

    #[test]
    fn quoted_cells_and_bom_are_handled() {
        let report = read("\u{feff}name,location\n\"Acid, strong\",\"Lab \"\"A\"\"\"\n", &["name"]);
        assert!(report.errors.is_empty());
        assert_eq!(report.rows[0].text("name").as_deref(), Some("Acid, strong"));
        assert_eq!(report.rows[0].text("location").as_deref(), Some("Lab \"A\""));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let report = read("name\nAcid,unexpected\n", &[]);
        assert_eq!(report.rows[0].columns().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn empty_file_has_no_header() {
        assert_eq!(
            read_batch("".as_bytes(), &["name"]),
            Err(ImportError::MissingHeader)
        );
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let bytes: &[u8] = b"name,quantity\n\xff\xfe,1\n";
        assert!(matches!(
            read_batch(bytes, &["name"]),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn duplicate_columns_keep_every_cell() {
        let report = read("name,name,quantity\nA,B,1\n", &["name"]);
        let row = &report.rows[0];
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["name", "name_1", "quantity"]
        );
        assert_eq!(row.text("name").as_deref(), Some("A"));
        assert_eq!(row.text("name_1").as_deref(), Some("B"));
    }

    #[test]
    fn duplicate_suffix_skips_taken_names() {
        let report = read("name,name_1,name\nA,B,C\n", &[]);
        assert_eq!(
            report.rows[0].columns().collect::<Vec<_>>(),
            vec!["name", "name_1", "name_2"]
        );
        assert_eq!(report.rows[0].text("name_2").as_deref(), Some("C"));
    }
}
