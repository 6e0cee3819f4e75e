//! JSON-aware extraction
//!
//! The payload is decoded lazily: each level is read as a map of
//! [`RawValue`]s, so only the objects on a field path are ever parsed and
//! string values can be handed on still escaped.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde_json::value::RawValue;

use super::{push_candidate, EntryFields, ExtractError, Field};
use crate::config::FieldMap;
use crate::item::Candidate;

type Object<'a> = BTreeMap<String, &'a RawValue>;

/// Extract candidates from a well-formed JSON payload
pub fn extract(
    body: &str,
    fields: &FieldMap,
    requested: u32,
) -> Result<Vec<Candidate>, ExtractError> {
    let root: &RawValue = serde_json::from_str(body).map_err(|_| ExtractError::Malformed)?;

    let collection = descend(root, &fields.collection).ok_or(ExtractError::MissingCollection)?;
    let entries: Vec<&RawValue> =
        serde_json::from_str(collection.get()).map_err(|_| ExtractError::MissingCollection)?;

    let mut candidates = Vec::new();
    for entry in entries {
        // Entries that are not objects carry no fields
        if serde_json::from_str::<Object<'_>>(entry.get()).is_err() {
            continue;
        }

        let entry_fields = EntryFields {
            text: lookup(entry, &fields.text),
            narrator: lookup(entry, &fields.narrator),
            book: lookup(entry, &fields.book),
            chapter: lookup(entry, &fields.chapter),
            number: lookup(entry, &fields.number),
        };
        push_candidate(&mut candidates, entry_fields, requested)?;
    }

    Ok(candidates)
}

/// Follow a key path through nested objects
fn descend<'a>(value: &'a RawValue, path: &[String]) -> Option<&'a RawValue> {
    let mut current = value;
    for key in path {
        let object: Object<'a> = serde_json::from_str(current.get()).ok()?;
        current = object.get(key).copied()?;
    }
    Some(current)
}

fn lookup<'a>(entry: &'a RawValue, path: &[String]) -> Field<'a> {
    match descend(entry, path) {
        Some(value) => classify(value),
        None => Field::Absent,
    }
}

/// Sort a raw value into the shared field shapes
fn classify(value: &RawValue) -> Field<'_> {
    let raw = value.get().trim();
    match raw.as_bytes().first() {
        Some(b'"') => raw
            .get(1..raw.len() - 1)
            .map_or(Field::Malformed, Field::Found),
        Some(b'{') | Some(b'[') => Field::Malformed,
        Some(_) if raw == "null" => Field::Null,
        Some(_) => Field::Scalar(raw),
        None => Field::Absent,
    }
}
