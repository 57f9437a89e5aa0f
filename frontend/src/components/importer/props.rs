//! Properties of the `CsvImporter` dialog.

use common::model::identity::ItemType;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CsvImporterProps {
    /// Kind of record the imported rows become.
    pub item_type: ItemType,

    /// Columns every row must fill. The preview lists them as a hint.
    pub required_fields: Vec<String>,

    /// Bearer token of the current session, used for the bulk-create calls.
    pub access_token: AttrValue,

    /// Called when the dialog is dismissed, with or without an import.
    pub on_close: Callback<()>,

    /// Called with the number of created records after a successful import.
    #[prop_or_default]
    pub on_imported: Callback<usize>,
}
