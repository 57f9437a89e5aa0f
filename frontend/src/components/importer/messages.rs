use common::import::SubmitFailure;

pub enum Msg {
    FileSelected(web_sys::File),
    FileRead { name: String, bytes: Vec<u8> },
    FileReadFailed(String),
    ChangeFile,
    Import,
    ImportFinished(Result<(), SubmitFailure>),
    Close,
}
