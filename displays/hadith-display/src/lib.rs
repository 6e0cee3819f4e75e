//! Panel abstraction and card composition for Hourly Hadith
//!
//! This crate provides:
//! - `PanelBackend` trait for two-plane (black/red) e-paper panels
//! - `FontId` table of the panel fonts
//! - Card composition: an accepted hadith (or a failure notice) becomes a
//!   list of text draws, which `present` puts on the panel in one refresh
//!
//! # Architecture
//!
//! Board firmware implements `PanelBackend` over its SPI panel driver and
//! frame buffers. Everything above pixel drawing lives here, so the card
//! looks the same on every board.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod card;
pub mod font;

// Re-export key types
pub use backend::{DisplayError, PanelBackend, Plane};
pub use card::{compose_card, compose_notice, present, Card, CardFonts, DrawOp, Notice};
pub use font::FontId;
