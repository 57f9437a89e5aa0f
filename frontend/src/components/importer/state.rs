//! Component state for the CSV import dialog.

use common::import::ImportSession;

/// State container for the `CsvImporter`.
///
/// The import session owns the parsed batch, its errors and the in-flight
/// flag; the component holds nothing else.
pub struct CsvImporter {
    pub session: ImportSession,
}

impl CsvImporter {
    pub fn new(required_fields: &[String]) -> Self {
        Self {
            session: ImportSession::new(required_fields.iter().cloned()),
        }
    }
}
