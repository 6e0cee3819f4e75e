//! Fetch loop driver
//!
//! Runs the state machine against a transport, a random source and a delay
//! provider. The budget counts fetches: every candidate in one payload is
//! screened before the next fetch is spent.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::attempt::{AttemptOutcome, FailureKind, FetchAttempt};
use super::events::Event;
use super::machine::State;
use crate::config::{CycleConfig, MAX_FETCH_ATTEMPTS};
use crate::extract::{extract, ExtractError};
use crate::item::{AcceptedItem, Candidate, Screening};
use crate::traits::HttpClient;

/// Terminal fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Every attempt in the budget failed
    Exhausted,
    /// A text buffer could not be allocated
    OutOfMemory,
}

/// An accepted item and the identifier that was requested for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub item: AcceptedItem,
    pub identifier: u32,
}

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// Attempts in order, at most the configured budget
    pub attempts: heapless::Vec<FetchAttempt, MAX_FETCH_ATTEMPTS>,
    pub outcome: Result<Fetched, FetchError>,
}

impl FetchReport {
    /// Number of fetches spent
    pub fn attempts_used(&self) -> usize {
        self.attempts.len()
    }

    /// Accepted item, if any
    pub fn item(&self) -> Option<&AcceptedItem> {
        self.outcome.as_ref().ok().map(|fetched| &fetched.item)
    }
}

/// Working data of the attempt in progress
#[derive(Default)]
struct AttemptContext {
    identifier: u32,
    status: Option<u16>,
    body: String,
    candidates: Vec<Candidate>,
}

/// Drives one bounded fetch cycle
pub struct HadithFetcher<'a, T, R, D> {
    config: &'a CycleConfig,
    transport: T,
    rng: R,
    delay: D,
}

impl<'a, T, R, D> HadithFetcher<'a, T, R, D>
where
    T: HttpClient,
    R: RngCore,
    D: DelayNs,
{
    /// Create a fetcher over validated configuration
    pub fn new(config: &'a CycleConfig, transport: T, rng: R, delay: D) -> Self {
        Self {
            config,
            transport,
            rng,
            delay,
        }
    }

    /// Give the collaborators back
    pub fn release(self) -> (T, R, D) {
        (self.transport, self.rng, self.delay)
    }

    /// Attempts allowed this cycle
    pub fn budget(&self) -> usize {
        usize::from(self.config.fetch.max_attempts).min(MAX_FETCH_ATTEMPTS)
    }

    /// Fetch until an item is accepted or the budget is spent
    pub fn run(&mut self) -> FetchReport {
        let mut attempts = heapless::Vec::new();
        let mut state = State::SelectingIdentifier;
        let mut ctx = AttemptContext::default();
        let mut accepted = None;
        let mut started = 0usize;
        let mut error = FetchError::Exhausted;

        while !state.is_terminal() {
            let event = match state {
                State::SelectingIdentifier => self.select(&mut ctx, &mut started),
                State::Fetching => self.fetch(&mut ctx),
                State::Extracting => self.extract(&mut ctx),
                State::ScreeningCandidates => self.screen(&mut ctx, &mut accepted),
                State::Accepted | State::Exhausted => break,
            };

            if event.ends_attempt() {
                let outcome = match event {
                    Event::CandidateAccepted => AttemptOutcome::Accepted,
                    Event::AttemptFailed(kind) => AttemptOutcome::Failed(kind),
                    _ => {
                        error = FetchError::OutOfMemory;
                        AttemptOutcome::OutOfMemory
                    }
                };
                // Capacity covers the largest budget
                let _ = attempts.push(FetchAttempt {
                    attempt_number: u8::try_from(started).unwrap_or(u8::MAX),
                    identifier: ctx.identifier,
                    status: ctx.status,
                    candidates: ctx.candidates.len(),
                    outcome,
                });
            }

            state = state.transition(event);
        }

        let outcome = match (state, accepted) {
            (State::Accepted, Some(item)) => Ok(Fetched {
                item,
                identifier: ctx.identifier,
            }),
            _ => Err(error),
        };

        #[cfg(feature = "defmt")]
        match &outcome {
            Ok(fetched) => defmt::info!(
                "Accepted hadith {} after {} attempt(s)",
                fetched.identifier,
                started
            ),
            Err(e) => defmt::warn!("No hadith after {} attempt(s): {}", started, e),
        }

        FetchReport { attempts, outcome }
    }

    /// SelectingIdentifier: check budget, back off, draw an identifier
    fn select(&mut self, ctx: &mut AttemptContext, started: &mut usize) -> Event {
        if *started >= self.budget() {
            return Event::BudgetSpent;
        }

        if *started > 0 {
            self.delay.delay_ms(self.config.fetch.backoff_ms);
        }

        let max = self.config.api.identifier_max.max(1);
        *ctx = AttemptContext {
            identifier: self.rng.gen_range(1..=max),
            ..AttemptContext::default()
        };
        *started += 1;

        #[cfg(feature = "defmt")]
        defmt::debug!("Attempt {} for identifier {}", *started, ctx.identifier);

        Event::IdentifierSelected
    }

    /// Fetching: one GET, success judged by status code
    fn fetch(&mut self, ctx: &mut AttemptContext) -> Event {
        let url = self.config.api.request_url(ctx.identifier);

        match self.transport.get(&url) {
            Ok(response) => {
                ctx.status = Some(response.status);
                if !self.config.api.is_success(response.status) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("HTTP status {}", response.status);
                    return Event::AttemptFailed(FailureKind::Transport);
                }

                #[cfg(feature = "defmt")]
                defmt::debug!("Response {} bytes", response.body.len());
                ctx.body = response.body;
                Event::ResponseReceived
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Transport error: {}", defmt::Debug2Format(&_e));
                Event::AttemptFailed(FailureKind::Transport)
            }
        }
    }

    /// Extracting: payload to candidates
    fn extract(&mut self, ctx: &mut AttemptContext) -> Event {
        let body = core::mem::take(&mut ctx.body);
        let result = extract(
            &body,
            &self.config.fields,
            self.config.fetch.strategy,
            ctx.identifier,
        );

        match result {
            Ok(candidates) if candidates.is_empty() => {
                Event::AttemptFailed(FailureKind::NoCandidate)
            }
            Ok(candidates) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("{} candidate(s)", candidates.len());
                ctx.candidates = candidates;
                Event::CandidatesExtracted
            }
            Err(ExtractError::OutOfMemory) => Event::AllocationFailed,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Unreadable payload: {}", _e);
                Event::AttemptFailed(FailureKind::Parse)
            }
        }
    }

    /// ScreeningCandidates: shuffle, then first candidate within policy wins
    fn screen(&mut self, ctx: &mut AttemptContext, accepted: &mut Option<AcceptedItem>) -> Event {
        ctx.candidates.shuffle(&mut self.rng);

        for candidate in &ctx.candidates {
            match AcceptedItem::screen(candidate, &self.config.acceptance) {
                Ok(Screening::Accepted(item)) => {
                    *accepted = Some(item);
                    return Event::CandidateAccepted;
                }
                Ok(Screening::Rejected { length: _length }) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Rejected candidate of length {}", _length);
                }
                Err(_) => return Event::AllocationFailed,
            }
        }

        Event::AttemptFailed(FailureKind::Rejected)
    }
}
