//! TOML configuration parsing
//!
//! Every section and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [network]
//! ssid = "home"
//! password = "secret"
//!
//! [api]
//! api_key = "..."
//! identifier_max = 7563
//!
//! [fetch]
//! max_attempts = 10
//! strategy = "structured"   # or "scan"
//!
//! [acceptance]
//! min_len = 50
//! max_len = 300
//! ```

use super::{ConfigError, CycleConfig};

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<CycleConfig, ConfigError> {
    let config: CycleConfig = ::toml::from_str(input).map_err(|_| ConfigError::Toml)?;
    config.validate()?;
    Ok(config)
}
