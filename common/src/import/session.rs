use super::{read_batch, ImportError};
use crate::model::import::{ImportRow, ValidationError};
use log::{info, warn};
use std::fmt::Display;
use std::future::Future;
use std::io::Read;

/// How much of a loaded batch the import dialog shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    pub preview_rows: usize,
    pub preview_errors: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            preview_errors: 5,
        }
    }
}

/// Why a bulk-create call failed, and how many leading rows of the batch it
/// had already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    pub created: usize,
    pub reason: String,
}

impl SubmitFailure {
    /// A failure before any row was stored.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            created: 0,
            reason: reason.into(),
        }
    }

    pub fn after(created: usize, reason: impl Into<String>) -> Self {
        Self {
            created,
            reason: reason.into(),
        }
    }
}

/// State of one open import dialog.
///
/// The session owns the parsed batch and its validation errors from the
/// moment a file is loaded until the batch is submitted or the dialog is
/// closed. At most one submission runs at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSession {
    required_fields: Vec<String>,
    config: ImportConfig,
    file_name: Option<String>,
    rows: Vec<ImportRow>,
    errors: Vec<ValidationError>,
    in_flight: bool,
}

impl ImportSession {
    pub fn new<S: Into<String>>(required_fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            required_fields: required_fields.into_iter().map(Into::into).collect(),
            config: ImportConfig::default(),
            file_name: None,
            rows: Vec::new(),
            errors: Vec::new(),
            in_flight: false,
        }
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the current batch with the content of `reader`.
    ///
    /// A file that cannot be parsed leaves the session empty and returns the
    /// parse error so the caller can notify the user.
    pub fn load<R: Read>(&mut self, file_name: &str, reader: R) -> Result<(), ImportError> {
        self.reset();
        let report = read_batch(reader, &self.required_fields).inspect_err(|err| {
            warn!("Failed to parse {}: {}", file_name, err);
        })?;
        info!(
            "Loaded {} row(s) from {} with {} validation error(s)",
            report.rows.len(),
            file_name,
            report.errors.len()
        );
        self.file_name = Some(file_name.to_string());
        self.rows = report.rows;
        self.errors = report.errors;
        Ok(())
    }

    pub fn load_str(&mut self, file_name: &str, text: &str) -> Result<(), ImportError> {
        self.load(file_name, text.as_bytes())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn preview_rows(&self) -> &[ImportRow] {
        &self.rows[..self.rows.len().min(self.config.preview_rows)]
    }

    pub fn preview_errors(&self) -> &[ValidationError] {
        &self.errors[..self.errors.len().min(self.config.preview_errors)]
    }

    /// Errors left out of the preview ("...and N more").
    pub fn hidden_error_count(&self) -> usize {
        self.errors.len().saturating_sub(self.config.preview_errors)
    }

    /// Header of the preview table: columns of the first row.
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.file_name.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        self.is_loaded() && self.errors.is_empty() && !self.in_flight
    }

    /// Marks the batch as being submitted and hands out a copy of it.
    ///
    /// Fails without side effects when nothing is loaded, when validation
    /// errors remain or when another submission has not finished yet.
    pub fn begin_submission(&mut self) -> Result<Vec<ImportRow>, ImportError> {
        if self.in_flight {
            return Err(ImportError::InFlight);
        }
        if !self.is_loaded() {
            return Err(ImportError::NothingLoaded);
        }
        if !self.errors.is_empty() {
            return Err(ImportError::HasErrors {
                errors: self.errors.len(),
            });
        }
        self.in_flight = true;
        Ok(self.rows.clone())
    }

    /// Records the outcome of the submission started by
    /// [`begin_submission`](Self::begin_submission).
    ///
    /// Success clears the session and returns the number of imported rows.
    /// Failure keeps the rows that were not stored so a retry does not
    /// create them twice.
    pub fn finish_submission(
        &mut self,
        outcome: Result<(), SubmitFailure>,
    ) -> Result<usize, ImportError> {
        self.in_flight = false;
        let failure = match outcome {
            Ok(()) => {
                let imported = self.rows.len();
                info!("Imported {} row(s)", imported);
                self.reset();
                return Ok(imported);
            }
            Err(failure) => failure,
        };

        let created = failure.created.min(self.rows.len());
        warn!(
            "Import failed after {} of {} row(s): {}",
            created,
            self.rows.len(),
            failure.reason
        );
        if created == 0 {
            return Err(ImportError::Submit(failure.reason));
        }
        self.rows.drain(..created);
        Err(ImportError::PartiallySubmitted {
            created,
            remaining: self.rows.len(),
            reason: failure.reason,
        })
    }

    /// Hands the whole batch to `submit` in a single call.
    pub async fn submit<F, Fut, E>(&mut self, submit: F) -> Result<usize, ImportError>
    where
        F: FnOnce(Vec<ImportRow>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let batch = self.begin_submission()?;
        let outcome = submit(batch)
            .await
            .map_err(|err| SubmitFailure::new(err.to_string()));
        self.finish_submission(outcome)
    }

    /// Drops the loaded file, rows and errors.
    pub fn reset(&mut self) {
        self.file_name = None;
        self.rows.clear();
        self.errors.clear();
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::import::CellValue;
    use std::cell::Cell;

    fn session() -> ImportSession {
        ImportSession::new(["quantity"])
    }

    #[tokio::test]
    async fn rows_with_errors_are_never_submitted() {
        let mut session = session();
        session
            .load_str("stock.csv", "name,quantity\nAcid,10\nBase,\n")
            .unwrap();
        assert_eq!(session.rows().len(), 2);
        assert_eq!(
            session.errors()[0].message,
            "Row 3: Missing required fields - quantity"
        );
        assert!(!session.can_submit());

        let calls = Cell::new(0);
        let result = session
            .submit(|_| async {
                calls.set(calls.get() + 1);
                Ok::<(), String>(())
            })
            .await;

        assert_eq!(result, Err(ImportError::HasErrors { errors: 1 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Please fix the errors before importing."
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(session.rows().len(), 2);
    }

    #[tokio::test]
    async fn valid_batch_is_submitted_once_in_file_order() {
        let mut session = session();
        session
            .load_str("stock.csv", "name,quantity\nAcid,10\nBase,4\nSalt,1\n")
            .unwrap();
        assert!(session.can_submit());

        let calls = Cell::new(0);
        let imported = session
            .submit(|batch| {
                calls.set(calls.get() + 1);
                let names: Vec<_> = batch.iter().map(|r| r.text("name").unwrap()).collect();
                assert_eq!(names, vec!["Acid", "Base", "Salt"]);
                assert_eq!(batch[0].get("quantity"), Some(&CellValue::Number(10.0)));
                async { Ok::<(), String>(()) }
            })
            .await
            .unwrap();

        assert_eq!(imported, 3);
        assert_eq!(calls.get(), 1);
        assert!(session.rows().is_empty());
        assert_eq!(session.file_name(), None);
    }

    #[tokio::test]
    async fn failed_submission_keeps_batch_for_retry() {
        let mut session = session();
        session.load_str("stock.csv", "name,quantity\nAcid,10\n").unwrap();

        let result = session
            .submit(|_| async { Err("connection reset") })
            .await;

        assert_eq!(
            result,
            Err(ImportError::Submit("connection reset".to_string()))
        );
        assert_eq!(session.rows().len(), 1);
        assert!(!session.is_in_flight());
        assert!(session.can_submit());
    }

    #[test]
    fn second_submission_waits_for_the_first() {
        let mut session = session();
        session.load_str("stock.csv", "name,quantity\nAcid,10\n").unwrap();

        let batch = session.begin_submission().unwrap();
        assert_eq!(batch.len(), 1);
        assert!(!session.can_submit());
        assert_eq!(session.begin_submission(), Err(ImportError::InFlight));

        assert_eq!(session.finish_submission(Ok(())), Ok(1));
        assert!(!session.is_loaded());
    }

    #[test]
    fn partial_failure_keeps_only_unsaved_rows() {
        let mut session = session();
        session
            .load_str("stock.csv", "name,quantity\nAcid,10\nBase,4\nSalt,1\n")
            .unwrap();
        session.begin_submission().unwrap();

        let result = session.finish_submission(Err(SubmitFailure::after(2, "timeout")));
        assert_eq!(
            result,
            Err(ImportError::PartiallySubmitted {
                created: 2,
                remaining: 1,
                reason: "timeout".to_string(),
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "2 items were imported before the failure; 1 remain. timeout"
        );
        let names: Vec<_> = session.rows().iter().map(|r| r.text("name").unwrap()).collect();
        assert_eq!(names, vec!["Salt"]);
        assert!(session.can_submit());

        let retry = session.begin_submission().unwrap();
        assert_eq!(retry.len(), 1);
        assert_eq!(session.finish_submission(Ok(())), Ok(1));
    }

    #[test]
    fn submission_requires_a_loaded_file() {
        let mut session = session();
        assert_eq!(session.begin_submission(), Err(ImportError::NothingLoaded));
    }

    #[test]
    fn header_only_file_can_be_submitted() {
        let mut session = session();
        session.load_str("empty.csv", "name,quantity\n").unwrap();
        assert!(session.rows().is_empty());
        assert!(session.can_submit());
    }

    #[test]
    fn unreadable_file_resets_session() {
        let mut session = session();
        session.load_str("good.csv", "name,quantity\nAcid,x\n").unwrap();
        assert_eq!(session.errors().len(), 1);

        let bytes: &[u8] = b"name,quantity\n\xff,1\n";
        assert!(matches!(
            session.load("bad.csv", bytes),
            Err(ImportError::Parse(_))
        ));
        assert!(session.rows().is_empty());
        assert!(session.errors().is_empty());
        assert_eq!(session.file_name(), None);
    }

    #[test]
    fn preview_is_bounded() {
        let mut text = String::from("name,quantity\n");
        for i in 0..12 {
            text.push_str(&format!("Item {},bad\n", i));
        }
        let mut session = session();
        session.load_str("many.csv", &text).unwrap();

        assert_eq!(session.rows().len(), 12);
        assert_eq!(session.preview_rows().len(), 10);
        assert_eq!(session.preview_errors().len(), 5);
        assert_eq!(session.hidden_error_count(), 7);
        assert_eq!(session.columns(), vec!["name", "quantity"]);

        let wide = session.with_config(ImportConfig {
            preview_rows: 20,
            preview_errors: 20,
        });
        assert_eq!(wide.preview_rows().len(), 12);
        assert_eq!(wide.hidden_error_count(), 0);
    }
}
