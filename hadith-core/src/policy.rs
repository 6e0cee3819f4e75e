//! Length acceptance policy
//!
//! A rejected candidate is not an error: the fetch loop simply moves on to
//! the next candidate, or to a new request.

use serde::{Deserialize, Serialize};

use crate::config::ConfigIssue;

/// Default minimum sanitized text length (bytes)
pub const DEFAULT_MIN_LENGTH: usize = 50;

/// Default maximum sanitized text length (bytes)
pub const DEFAULT_MAX_LENGTH: usize = 300;

/// Length bounds for sanitized hadith text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct AcceptancePolicy {
    /// Shortest accepted text, inclusive
    pub min_len: usize,
    /// Longest accepted text, inclusive
    pub max_len: usize,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH, DEFAULT_MAX_LENGTH)
    }
}

impl AcceptancePolicy {
    pub const fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Check a sanitized length against the bounds
    pub fn accepts(&self, len: usize) -> bool {
        self.min_len <= len && len <= self.max_len
    }

    /// Reject bounds that can never accept anything
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.min_len > self.max_len {
            return Err(ConfigIssue::LengthBoundsInverted);
        }
        Ok(())
    }
}
