use crate::model::identity::{IdentityToken, ItemType};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The scanned text is not JSON.
    #[error("Scanned QR code is not in the correct format.")]
    Malformed { reason: String },
    /// JSON, but not an object carrying a non-empty `id` and `type`.
    #[error("Invalid QR code scanned.")]
    MissingFields,
}

/// A structurally valid token whose `type` does not match the scanning context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Scanned item is not of the expected type.")]
pub struct TypeMismatch {
    pub expected: ItemType,
    pub found: String,
}

/// A decoded payload before its `type` has been checked.
///
/// `item_type` stays a string here: a label printed for another kind of
/// record, or by another system, still decodes and is rejected later as a
/// type mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedIdentity {
    pub id: String,
    pub item_type: String,
    pub name: String,
}

impl ScannedIdentity {
    /// Accepts the identity only in a context expecting `expected`.
    pub fn expect(self, expected: ItemType) -> Result<IdentityToken, TypeMismatch> {
        if self.item_type != expected.as_str() {
            return Err(TypeMismatch {
                expected,
                found: self.item_type,
            });
        }
        Ok(IdentityToken::new(self.id, expected, self.name))
    }
}

/// Serializes `token` as the QR payload `{"id":..,"type":..,"name":..}`.
pub fn encode(token: &IdentityToken) -> String {
    // Only string fields, so serialization cannot fail.
    serde_json::to_string(token).unwrap_or_default()
}

/// Parses scanned text back into an identity.
///
/// Numeric ids are accepted and kept as their decimal text. A missing or
/// non-string `name` decodes as an empty name.
pub fn decode(text: &str) -> Result<ScannedIdentity, DecodeError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|err| DecodeError::Malformed {
        reason: err.to_string(),
    })?;
    let Value::Object(fields) = value else {
        return Err(DecodeError::MissingFields);
    };

    let id = scalar_text(&fields, "id").ok_or(DecodeError::MissingFields)?;
    let item_type = scalar_text(&fields, "type").ok_or(DecodeError::MissingFields)?;
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(ScannedIdentity {
        id,
        item_type,
        name,
    })
}

fn scalar_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
