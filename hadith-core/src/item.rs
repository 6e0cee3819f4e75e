//! Candidate and accepted hadith entries

use alloc::collections::TryReserveError;
use alloc::string::String;
use core::fmt::Write;

use crate::policy::AcceptancePolicy;
use crate::text::try_sanitize;

/// Book label used when the payload names no book
pub const UNKNOWN_BOOK: &str = "Unknown Book";

/// Chapter label used when the payload names no chapter
pub const UNKNOWN_CHAPTER: &str = "Unknown Chapter";

/// One entry pulled out of a payload, not yet validated
///
/// Text fields hold the raw string content as it appeared in the payload,
/// escapes included. Only [`AcceptedItem::screen`] turns them into display
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Primary (English) hadith text
    pub text: String,
    /// Attribution: book name
    pub book: String,
    /// Attribution: chapter title
    pub chapter: String,
    /// Narrator line, empty when the payload has none
    pub narrator: String,
    /// Catalog number of this entry
    pub identifier: u32,
}

/// Result of screening one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Candidate passed sanitization and the length policy
    Accepted(AcceptedItem),
    /// Sanitized text length fell outside the policy bounds
    Rejected {
        /// Sanitized length that was tested
        length: usize,
    },
}

/// A candidate that passed sanitization and the length policy
///
/// All fields are display text: printable ASCII only, and the hadith text
/// length lies within the policy that accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedItem {
    text: String,
    book: String,
    chapter: String,
    narrator: String,
    identifier: u32,
}

impl AcceptedItem {
    /// Sanitize a candidate and check it against the policy
    ///
    /// Metadata is only sanitized once the text has been accepted.
    pub fn screen(
        candidate: &Candidate,
        policy: &AcceptancePolicy,
    ) -> Result<Screening, TryReserveError> {
        let text = try_sanitize(&candidate.text)?;
        if !policy.accepts(text.len()) {
            return Ok(Screening::Rejected { length: text.len() });
        }

        Ok(Screening::Accepted(Self {
            text,
            book: try_sanitize(&candidate.book)?,
            chapter: try_sanitize(&candidate.chapter)?,
            narrator: try_sanitize(&candidate.narrator)?,
            identifier: candidate.identifier,
        }))
    }

    /// Sanitized hadith text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sanitized book name
    pub fn book(&self) -> &str {
        &self.book
    }

    /// Sanitized chapter title
    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    /// Sanitized narrator line (may be empty)
    pub fn narrator(&self) -> &str {
        &self.narrator
    }

    /// Catalog number
    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Attribution line: `"<book> - <chapter>"`
    pub fn source(&self) -> String {
        let mut source = String::with_capacity(self.book.len() + self.chapter.len() + 3);
        // Writing into a String cannot fail
        let _ = write!(source, "{} - {}", self.book, self.chapter);
        source
    }
}
