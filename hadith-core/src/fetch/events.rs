//! Events that trigger fetch state transitions

use super::attempt::FailureKind;

/// Events reported by the step performed in each state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Selection events
    /// Identifier drawn; budget remained
    IdentifierSelected,
    /// Attempt budget used up
    BudgetSpent,

    // Attempt progress
    /// Transport returned a success status
    ResponseReceived,
    /// Payload yielded at least one candidate
    CandidatesExtracted,
    /// A candidate passed sanitization and the length policy
    CandidateAccepted,

    // Attempt failures
    /// The attempt ended without an item
    AttemptFailed(FailureKind),
    /// A text buffer could not be allocated
    AllocationFailed,
}

impl Event {
    /// Check if this event ends the current attempt
    pub fn ends_attempt(&self) -> bool {
        matches!(
            self,
            Event::AttemptFailed(_) | Event::CandidateAccepted | Event::AllocationFailed
        )
    }
}
