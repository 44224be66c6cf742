//! Error types for frame resolution, transforms and Earth-orientation lookups

use thiserror::Error;

/// Main error type for starframes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// An operation received an undefined transform, frame name or instant
    #[error("Undefined operand: {0}")]
    UndefinedOperand(&'static str),

    /// A frame's ancestor chain does not reach the registered root frame
    #[error("Frame [{frame}] has no registered path to the root frame")]
    NoPathToRoot { frame: String },

    /// A frame with the same name but a different definition is registered
    #[error("Frame with name [{name}] already exists with a different definition")]
    AlreadyExists { name: String },

    /// Earth-orientation data is unavailable and the mode is strict
    #[error("Missing Earth orientation data [{parameter}] at MJD {mjd_utc} (UTC)")]
    MissingEarthOrientationData {
        parameter: &'static str,
        mjd_utc: f64,
    },

    /// No frame is registered under the requested name
    #[error("No frame with name [{0}]")]
    NoFrameWithName(String),

    /// Two transforms at different instants were combined
    #[error("Instants are different: {left} vs {right}")]
    InstantMismatch { left: String, right: String },

    /// An ancestor beyond the root was requested
    #[error("Ancestor degree [{degree}] is greater than depth [{depth}]")]
    AncestorOutOfRange { degree: usize, depth: usize },

    /// A configuration value could not be interpreted
    #[error("Invalid value [{value}] for {key}: {reason}")]
    InvalidConfiguration {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Earth-orientation records are not usable for interpolation
    #[error("Invalid Earth orientation table: {0}")]
    InvalidEarthOrientationTable(String),

    /// A calendar date or time could not be represented
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

/// Result type for starframes operations
pub type Result<T> = std::result::Result<T, FrameError>;
