//! Board-agnostic core logic for the Hourly Hadith e-paper card
//!
//! This crate contains everything that happens between "the network is up"
//! and "the panel can draw":
//!
//! - Collaborator traits (HTTP transport)
//! - Configuration types, TOML parsing and flash blob encoding
//! - Field extraction from API payloads (structured and scanning)
//! - Text sanitization for the basic-ASCII panel font
//! - Length acceptance policy
//! - Fetch state machine and bounded retry loop
//! - Greedy word-wrap layout

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod extract;
pub mod fetch;
pub mod item;
pub mod layout;
pub mod policy;
pub mod text;
pub mod traits;

pub use item::{AcceptedItem, Candidate};
