//! Conversion between stored BSON documents and domain records.
//!
//! Records travel through `serde_json` in both directions so the in-memory
//! and document-store adapters share one serde shape. Object ids are
//! rendered as 24-digit hex strings inside the domain and restored to BSON
//! object ids on the way back.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{ID_FIELD, RecordId};

pub(super) fn object_id(id: &RecordId) -> Result<ObjectId, String> {
    ObjectId::parse_str(id.as_ref()).map_err(|err| format!("invalid object id {id}: {err}"))
}

/// Fresh store-style identifier for a record about to be inserted.
pub(super) fn new_record_id() -> Result<RecordId, String> {
    RecordId::new(ObjectId::new().to_hex()).map_err(|err| err.to_string())
}

/// Serialise a record into a BSON document with a native `_id`.
pub(super) fn encode<T: Serialize>(value: &T) -> Result<Document, String> {
    let mut document =
        bson::to_document(value).map_err(|err| format!("encode document: {err}"))?;
    if let Some(Bson::String(hex)) = document.get(ID_FIELD).cloned() {
        let id = ObjectId::parse_str(&hex).map_err(|err| format!("encode _id {hex}: {err}"))?;
        document.insert(ID_FIELD, id);
    }
    Ok(document)
}

/// Deserialise a stored document, rendering `_id` as hex.
pub(super) fn decode<T: DeserializeOwned>(mut document: Document) -> Result<T, String> {
    if let Ok(id) = document.get_object_id(ID_FIELD) {
        document.insert(ID_FIELD, id.to_hex());
    }
    let value = Bson::Document(document).into_relaxed_extjson();
    serde_json::from_value(value).map_err(|err| format!("decode document: {err}"))
}

/// Decode every document of a listing, skipping the ones that do not fit.
///
/// Collections predate this service and are schemaless, so a single odd row
/// must not fail the whole listing. Each skipped row is logged with its id.
pub(super) fn decode_each<T: DeserializeOwned>(
    collection: &str,
    documents: Vec<Document>,
) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.get(ID_FIELD).map(ToString::to_string);
            decode(document)
                .map_err(|error| warn!(collection, id = id.as_deref(), %error, "skipping undecodable document"))
                .ok()
        })
        .collect()
}
