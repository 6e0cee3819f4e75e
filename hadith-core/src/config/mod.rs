//! Configuration
//!
//! Authored as TOML, validated after parsing, and kept in flash as a
//! postcard blob between wake cycles.

pub mod display;
pub mod store;
pub mod toml;
pub mod types;

pub use display::DisplayGeometry;
pub use store::{decode_config, encode_config, CONFIG_VERSION};
pub use self::toml::parse_config;
pub use types::*;

pub use crate::policy::AcceptancePolicy;

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax or type error
    Toml,
    /// Parsed, but rejected by validation
    Invalid(ConfigIssue),
    /// Serialization to a flash blob failed
    Encode,
    /// Flash blob could not be deserialized
    Decode,
    /// Flash blob written by a different config layout
    VersionMismatch,
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        ConfigError::Invalid(issue)
    }
}
