//! Field extraction from API payloads
//!
//! Two strategies produce the same [`Candidate`]s from a payload:
//!
//! - [`structured`]: JSON-aware parse, one object level at a time
//! - [`scan`]: textual key search for payloads that are not strictly valid
//!
//! Both reduce every field lookup to a [`Field`] and share the same rules
//! for turning an entry's fields into a candidate. String values are kept
//! in their escaped form; unescaping is left to the sanitizer.

pub mod scan;
pub mod structured;

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{ExtractStrategy, FieldMap};
use crate::item::{Candidate, UNKNOWN_BOOK, UNKNOWN_CHAPTER};

/// Extraction errors
///
/// An empty collection is not an error; it yields no candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtractError {
    /// Payload could not be parsed at all
    Malformed,
    /// Collection path absent, or not an array
    MissingCollection,
    /// Candidate buffers could not be allocated
    OutOfMemory,
}

impl From<alloc::collections::TryReserveError> for ExtractError {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        ExtractError::OutOfMemory
    }
}

/// Result of looking up one field in an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// String value, contents between the quotes, escapes untouched
    Found(&'a str),
    /// Number or boolean, as written
    Scalar(&'a str),
    /// Explicit `null`
    Null,
    /// Key not present
    Absent,
    /// Key present, value unreadable or of an unexpected shape
    Malformed,
}

impl<'a> Field<'a> {
    fn text(self) -> Option<&'a str> {
        match self {
            Field::Found(s) => Some(s),
            _ => None,
        }
    }

    fn number(self) -> Option<u32> {
        match self {
            Field::Found(s) | Field::Scalar(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Looked-up fields of one collection entry
#[derive(Debug, Clone, Copy)]
pub struct EntryFields<'a> {
    pub text: Field<'a>,
    pub narrator: Field<'a>,
    pub book: Field<'a>,
    pub chapter: Field<'a>,
    pub number: Field<'a>,
}

impl EntryFields<'_> {
    /// Build a candidate, or `None` if the entry has no usable text
    ///
    /// Missing metadata falls back to fixed labels; a missing or unreadable
    /// number falls back to the identifier that was requested.
    pub fn into_candidate(self, requested: u32) -> Result<Option<Candidate>, ExtractError> {
        let Some(text) = self.text.text() else {
            return Ok(None);
        };

        Ok(Some(Candidate {
            text: owned(text)?,
            book: owned(self.book.text().unwrap_or(UNKNOWN_BOOK))?,
            chapter: owned(self.chapter.text().unwrap_or(UNKNOWN_CHAPTER))?,
            narrator: owned(self.narrator.text().unwrap_or(""))?,
            identifier: self.number.number().unwrap_or(requested),
        }))
    }
}

fn owned(s: &str) -> Result<String, ExtractError> {
    let mut out = String::new();
    out.try_reserve(s.len())?;
    out.push_str(s);
    Ok(out)
}

/// Pull candidates out of a payload with the configured strategy
pub fn extract(
    body: &str,
    fields: &FieldMap,
    strategy: ExtractStrategy,
    requested: u32,
) -> Result<Vec<Candidate>, ExtractError> {
    match strategy {
        ExtractStrategy::Structured => structured::extract(body, fields, requested),
        ExtractStrategy::Scan => scan::extract(body, fields, requested),
    }
}

/// Append a candidate, reporting allocation failure
fn push_candidate(
    candidates: &mut Vec<Candidate>,
    entry: EntryFields<'_>,
    requested: u32,
) -> Result<(), ExtractError> {
    if let Some(candidate) = entry.into_candidate(requested)? {
        candidates.try_reserve(1)?;
        candidates.push(candidate);
    }
    Ok(())
}
