//! Flash blob encoding for the configuration
//!
//! Layout: one version byte followed by the postcard-serialized
//! [`CycleConfig`].

use alloc::vec::Vec;

use super::{ConfigError, CycleConfig};

/// Version byte of the current blob layout
pub const CONFIG_VERSION: u8 = 1;

/// Serialize a configuration for flash storage
pub fn encode_config(config: &CycleConfig) -> Result<Vec<u8>, ConfigError> {
    let body = postcard::to_allocvec(config).map_err(|_| ConfigError::Encode)?;

    let mut blob = Vec::new();
    blob.try_reserve(body.len() + 1)
        .map_err(|_| ConfigError::Encode)?;
    blob.push(CONFIG_VERSION);
    blob.extend_from_slice(&body);
    Ok(blob)
}

/// Deserialize and validate a configuration read back from flash
pub fn decode_config(blob: &[u8]) -> Result<CycleConfig, ConfigError> {
    let (&version, body) = blob.split_first().ok_or(ConfigError::Decode)?;
    if version != CONFIG_VERSION {
        return Err(ConfigError::VersionMismatch);
    }

    let config: CycleConfig = postcard::from_bytes(body).map_err(|_| ConfigError::Decode)?;
    config.validate()?;
    Ok(config)
}
