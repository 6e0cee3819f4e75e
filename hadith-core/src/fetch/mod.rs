//! Bounded fetch-and-screen loop
//!
//! One wake cycle runs [`HadithFetcher::run`] once. The loop is an explicit
//! state machine: each state performs one step against the collaborators
//! and reports an [`Event`]; [`State::transition`] decides what comes next.

pub mod attempt;
pub mod events;
pub mod fetcher;
pub mod machine;

pub use attempt::{AttemptOutcome, FailureKind, FetchAttempt};
pub use events::Event;
pub use fetcher::{FetchError, FetchReport, Fetched, HadithFetcher};
pub use machine::State;
