//! Shared document primitives: store-assigned record identifiers and the open
//! field map used for schemaless request bodies.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Open set of document fields keyed by field name.
///
/// Declared fields live on the owning type; everything else a client or an
/// older stored document carries is preserved here.
pub type Fields = Map<String, Value>;

/// Read an absent or `null` declared field as its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Field name used by the document store for record identifiers.
pub const ID_FIELD: &str = "_id";

/// Length of a store object id rendered as hexadecimal.
const RECORD_ID_HEX_LEN: usize = 24;

/// Validation errors returned by [`RecordId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdValidationError {
    #[error("record id must not be empty")]
    Empty,
    #[error("record id must be {RECORD_ID_HEX_LEN} hexadecimal characters")]
    Malformed,
}

/// Store-assigned record identifier.
///
/// ## Invariants
/// - Exactly 24 ASCII hexadecimal characters, normalised to lowercase.
///
/// # Examples
/// ```
/// use feedforward::domain::RecordId;
///
/// let id = RecordId::new("65A1F0C2B3D4E5F60718293A").unwrap();
/// assert_eq!(id.as_ref(), "65a1f0c2b3d4e5f60718293a");
/// assert!(RecordId::new("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and construct a [`RecordId`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordIdValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(RecordIdValidationError::Empty);
        }
        if raw.len() != RECORD_ID_HEX_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RecordIdValidationError::Malformed);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Identifier derived from a sequence number, zero-padded to 24 digits.
    pub fn from_counter(n: u64) -> Self {
        Self(format!("{n:024x}"))
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Interpret a JSON body as a free-form document.
///
/// Store-reserved keys are dropped so clients cannot choose record ids.
pub fn into_fields(body: Value) -> Option<Fields> {
    match body {
        Value::Object(mut fields) => {
            fields.remove(ID_FIELD);
            Some(fields)
        }
        _ => None,
    }
}
