//! Error types for waveform construction and buffer rendering.

use thiserror::Error;

/// Result type for waveform operations
pub type Result<T> = std::result::Result<T, WaveformError>;

/// Errors raised while building waveforms or rendering them into buffers.
///
/// Evaluation never fails: every error here is reported by a constructor,
/// a builder, or the sampling layer before any value is produced.
#[derive(Error, Debug)]
pub enum WaveformError {
    /// A construction argument is outside its legal range
    #[error("Invalid parameter `{what}`: {reason}")]
    InvalidParameter { what: &'static str, reason: String },

    /// An upload identifier contains a character the instrument uses as a separator
    #[error("Name '{name}' contains reserved character '{ch}'")]
    ReservedCharacter { name: String, ch: char },

    /// A time-sampled buffer would exceed the instrument's point budget
    #[error("Buffer of {points} points exceeds limit of {limit}")]
    BufferTooLarge { points: usize, limit: usize },

    /// An upload identifier could not be decoded
    #[error("Malformed identifier '{0}'")]
    MalformedIdentifier(String),

    /// A configuration document could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// WAV import or export failed
    #[cfg(feature = "wav")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

impl WaveformError {
    /// Shorthand for an [`WaveformError::InvalidParameter`].
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        WaveformError::InvalidParameter {
            what,
            reason: reason.into(),
        }
    }

    /// Check if this error was raised while constructing a waveform
    pub fn is_construction(&self) -> bool {
        matches!(self, WaveformError::InvalidParameter { .. })
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WaveformError::invalid(
            what,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Fails unless `value` lies strictly inside `(0, 1)`.
pub(crate) fn ensure_unit_open(what: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(WaveformError::invalid(
            what,
            format!("must be in (0.0, 1.0), got {value}"),
        ))
    }
}
