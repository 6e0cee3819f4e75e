//! Per-attempt records

/// Why an attempt ended without an item
///
/// All of these are recoverable; the loop retries while budget remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureKind {
    /// Connection error, timeout, or a status outside the success list
    Transport,
    /// Payload unreadable, or without the expected collection
    Parse,
    /// Collection present but no entry had usable text
    NoCandidate,
    /// Every candidate fell outside the length policy
    Rejected,
}

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttemptOutcome {
    /// A candidate was accepted
    Accepted,
    /// Retryable failure
    Failed(FailureKind),
    /// A buffer could not be allocated; the cycle stops here
    OutOfMemory,
}

/// One fetch attempt, for logging by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FetchAttempt {
    /// 1-based attempt counter
    pub attempt_number: u8,
    /// Identifier that was requested
    pub identifier: u32,
    /// HTTP status, if the transport got that far
    pub status: Option<u16>,
    /// Candidates extracted from the payload
    pub candidates: usize,
    pub outcome: AttemptOutcome,
}
