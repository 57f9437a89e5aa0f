pub mod activity;
pub mod admin;
pub mod chemical;
pub mod form;
pub mod identity;
pub mod import;
pub mod notification;
pub mod profile;
pub mod record_form;
pub mod waste;

use serde::{Deserialize, Deserializer};

/// Accepts a record identifier sent either as a JSON string or as a number.
///
/// The hosted database hands out text ids for some tables and integer ids for
/// others; both end up as an opaque `String` on this side.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
