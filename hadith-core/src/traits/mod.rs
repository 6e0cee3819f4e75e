//! Collaborator traits
//!
//! The core never touches the network stack directly. Board firmware
//! provides a transport; randomness and delays come from `rand` and
//! `embedded-hal` traits.

pub mod http;

pub use http::{HttpClient, HttpResponse};
