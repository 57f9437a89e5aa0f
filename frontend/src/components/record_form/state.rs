use common::model::form::FieldErrors;
use common::model::record_form::RecordForm;

pub struct RecordFormDialog {
    pub form: RecordForm,
    /// Messages of the last rejected save, shown under each input.
    pub errors: FieldErrors,
    pub saving: bool,
}

impl RecordFormDialog {
    pub fn new(form: RecordForm) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            saving: false,
        }
    }
}
