//! Fetch state machine definition
//!
//! The transition table is pure; the fetcher performs the work of each
//! state and feeds the resulting event back in.

use super::attempt::FailureKind;
use super::events::Event;

/// Fetch loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Checking budget and drawing a random identifier
    SelectingIdentifier,
    /// Waiting on the transport
    Fetching,
    /// Pulling candidates out of the payload
    Extracting,
    /// Sanitizing and length-checking shuffled candidates
    ScreeningCandidates,
    /// An item was accepted
    Accepted,
    /// No item this cycle (budget spent, or out of memory)
    Exhausted,
}

impl State {
    /// Check if the loop has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Accepted | State::Exhausted)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Budget is checked before every attempt
            (SelectingIdentifier, IdentifierSelected) => Fetching,
            (SelectingIdentifier, BudgetSpent) => Exhausted,

            // Fetching transitions
            (Fetching, ResponseReceived) => Extracting,
            (Fetching, AttemptFailed(FailureKind::Transport)) => SelectingIdentifier,

            // Extracting transitions
            (Extracting, CandidatesExtracted) => ScreeningCandidates,
            (Extracting, AttemptFailed(FailureKind::Parse | FailureKind::NoCandidate)) => {
                SelectingIdentifier
            }
            (Extracting, AllocationFailed) => Exhausted,

            // Screening transitions
            (ScreeningCandidates, CandidateAccepted) => Accepted,
            (ScreeningCandidates, AttemptFailed(FailureKind::Rejected)) => SelectingIdentifier,
            (ScreeningCandidates, AllocationFailed) => Exhausted,

            // Default: stay in current state
            _ => self,
        }
    }
}
