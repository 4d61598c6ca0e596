//! Serializer configuration.
//!
//! [`SerializerConfig`] controls output buffer sizing and float formatting.
//! It can be built in code or deserialized as part of a host's configuration:
//!
//! ```rust
//! use imprint::SerializerConfig;
//!
//! let config = SerializerConfig::from_yaml(r#"
//! buffer_size: 256
//! float_precision: 3
//! "#).unwrap();
//!
//! assert_eq!(config.buffer_size, 256);
//! assert_eq!(config.float_precision, 3);
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

/// Largest accepted float precision; beyond this f64 has no more digits to show.
pub const MAX_FLOAT_PRECISION: usize = 17;

/// Upper bound on the bytes reserved up front for one render call.
///
/// `buffer_size` is a capacity hint; reservations never exceed this, and
/// output larger than it still grows as needed.
pub const MAX_RESERVED_CAPACITY: usize = 1 << 20;

/// Options shared by the JSON and line-protocol serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerConfig {
    /// Initial capacity, in bytes, reserved for each rendered record.
    ///
    /// Reservations are capped at [`MAX_RESERVED_CAPACITY`] per call.
    pub buffer_size: usize,
    /// Decimals written for render-time floats and line-protocol values.
    pub float_precision: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 100,
            float_precision: 6,
        }
    }
}

impl SerializerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-record buffer size.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the float precision.
    pub fn float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Parses a configuration from YAML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML, unknown keys, or values
    /// that fail [`validate`](Self::validate).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Bytes to reserve for one record.
    pub(crate) fn record_capacity(&self) -> usize {
        self.buffer_size.min(MAX_RESERVED_CAPACITY)
    }

    /// Bytes to reserve for a batch of `count` records plus `extra`
    /// separator bytes.
    pub(crate) fn batch_capacity(&self, count: usize, extra: usize) -> usize {
        self.buffer_size
            .saturating_mul(count)
            .saturating_add(extra)
            .min(MAX_RESERVED_CAPACITY)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.float_precision > MAX_FLOAT_PRECISION {
            return Err(Error::Config(format!(
                "float_precision must be at most {}, got {}",
                MAX_FLOAT_PRECISION, self.float_precision
            )));
        }
        Ok(())
    }
}
