use crate::import::ImportSession;
use crate::model::import::{ImportRow, ValidationError};
use serde::{Deserialize, Serialize};

/// Response of the import preview endpoint.
///
/// Mirrors what the import dialog shows: the first rows, the first errors and
/// how many errors were left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub file_name: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<ImportRow>,
    pub errors: Vec<ValidationError>,
    pub hidden_errors: usize,
}

impl ImportPreview {
    pub fn from_session(session: &ImportSession) -> Self {
        Self {
            file_name: session.file_name().unwrap_or_default().to_string(),
            total_rows: session.rows().len(),
            columns: session.columns(),
            rows: session.preview_rows().to_vec(),
            errors: session.preview_errors().to_vec(),
            hidden_errors: session.hidden_error_count(),
        }
    }

    pub fn can_import(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Query string of the label endpoint: `?name=...`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LabelQuery {
    #[serde(default)]
    pub name: String,
}

/// Error body returned by the API, `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
