//! Text normalization
//!
//! The panel fonts only carry printable ASCII, so every string that ends up
//! on the card passes through [`sanitize`] first.

pub mod sanitize;

pub use sanitize::{is_basic_text, sanitize, try_sanitize, HONORIFIC_GLOSS};
