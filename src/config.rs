//! Manager configuration
//!
//! Read once when a [`Manager`](crate::framelib::Manager) is created and
//! immutable afterwards.

use std::env;

use crate::eoplib::EopMode;
use crate::errors::{FrameError, Result};

/// Environment variable holding the maximum number of source-frame cache buckets
pub const MAX_TRANSFORM_CACHE_SIZE_VAR: &str = "STARFRAMES_MAX_TRANSFORM_CACHE_SIZE";

/// Environment variable selecting `strict` or `lenient` Earth-orientation handling
pub const EOP_MODE_VAR: &str = "STARFRAMES_EOP_MODE";

pub const DEFAULT_MAX_TRANSFORM_CACHE_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Distinct source frames the cache holds before it is cleared
    pub max_transform_cache_size: usize,
    /// Policy for the manager's default Earth-orientation data
    pub eop_mode: EopMode,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_transform_cache_size: DEFAULT_MAX_TRANSFORM_CACHE_SIZE,
            eop_mode: EopMode::default(),
        }
    }
}

impl ManagerConfig {
    /// Read the configuration from the process environment
    ///
    /// Unset variables keep their defaults. A set but malformed variable is
    /// an error rather than being ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_TRANSFORM_CACHE_SIZE_VAR) {
            config.max_transform_cache_size = parse_cache_size(&raw)?;
        }

        if let Some(raw) = lookup(EOP_MODE_VAR) {
            config.eop_mode = raw
                .parse()
                .map_err(|reason| FrameError::InvalidConfiguration {
                    key: EOP_MODE_VAR,
                    value: raw.clone(),
                    reason,
                })?;
        }

        Ok(config)
    }

    pub fn with_max_transform_cache_size(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(FrameError::InvalidConfiguration {
                key: MAX_TRANSFORM_CACHE_SIZE_VAR,
                value: size.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.max_transform_cache_size = size;
        Ok(self)
    }

    pub fn with_eop_mode(mut self, mode: EopMode) -> Self {
        self.eop_mode = mode;
        self
    }
}

fn parse_cache_size(raw: &str) -> Result<usize> {
    let invalid = |reason: &str| FrameError::InvalidConfiguration {
        key: MAX_TRANSFORM_CACHE_SIZE_VAR,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(size) => Ok(size),
        Err(_) => Err(invalid("expected a positive integer")),
    }
}
