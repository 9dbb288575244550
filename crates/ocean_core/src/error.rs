//! Error types for the ocean engine.
//!
//! Only configuration parsing and explicit vent-control calls can fail.
//! Grid bounds violations, resource underflow and lethal mutations are
//! ordinary outcomes and never surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OceanError {
    /// Configuration failed to parse or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid or chemical name did not match any channel
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// Vent-control call addressed a vent that does not exist
    #[error("Vent index {index} out of range ({count} vents)")]
    VentIndex { index: usize, count: usize },

    /// Config file could not be parsed as TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for ocean engine operations.
pub type Result<T> = std::result::Result<T, OceanError>;

impl OceanError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub fn unknown_channel<S: Into<String>>(name: S) -> Self {
        Self::UnknownChannel(name.into())
    }
}

/// Resolves a channel name, accepting the usual aliases.
pub fn parse_channel(name: &str) -> Result<ocean_data::GridChannel> {
    ocean_data::GridChannel::parse(name).ok_or_else(|| OceanError::unknown_channel(name))
}
