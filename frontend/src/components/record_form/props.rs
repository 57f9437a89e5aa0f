use common::model::record_form::RecordForm;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RecordFormProps {
    /// Initial values; blank for a new record, pre-filled for an edit.
    pub form: RecordForm,

    /// Id of the record being edited. `None` creates a new one.
    #[prop_or_default]
    pub record_id: Option<String>,

    pub access_token: AttrValue,

    pub on_close: Callback<()>,

    /// Called after the data API accepted the record.
    #[prop_or_default]
    pub on_saved: Callback<()>,
}
