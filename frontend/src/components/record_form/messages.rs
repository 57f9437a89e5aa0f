pub enum Msg {
    SetField { field: &'static str, value: String },
    Save,
    Saved(Result<(), String>),
    Close,
}
