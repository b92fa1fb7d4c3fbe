//! Range checks for engine configuration.

use thiserror::Error;

/// Accepted sample rates, in Hz.
pub const SAMPLE_RATE_RANGE: (u32, u32) = (8000, 192_000);

/// Accepted output channel counts.
pub const CHANNEL_RANGE: (u16, u16) = (1, 8);

/// Longest accepted waveform segment, in seconds.
pub const MAX_WAVEFORM_DURATION_SECS: f32 = 10.0;

/// Accepted segment counts.
pub const WAVEFORM_COUNT_RANGE: (usize, usize) = (1, 64);

/// Largest render buffer a configuration may require, in samples across all
/// channels (`sample_rate * waveform_duration * max_waveform_count * channels`).
pub const MAX_RENDER_SAMPLES: usize = 1 << 26;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its accepted range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Value that must be strictly positive.
    #[error("'{field}' must be greater than zero, got {value}")]
    NotPositive {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Combination of values whose render buffer exceeds [`MAX_RENDER_SAMPLES`].
    #[error("render buffer of {samples} samples exceeds the limit of {max}")]
    RenderTooLarge {
        /// Samples the configuration would allocate.
        samples: usize,
        /// Accepted maximum.
        max: usize,
    },

    /// Note name that does not parse.
    #[error("'{field}' is not a playable note: {value}")]
    InvalidNote {
        /// Name of the field.
        field: &'static str,
        /// The rejected note name.
        value: String,
    },
}

/// Result of a validation check.
pub type ValidationResult = Result<(), ValidationError>;

/// Check `value` against an inclusive range.
pub fn check_range(
    field: &'static str,
    value: impl Into<f64>,
    min: impl Into<f64>,
    max: impl Into<f64>,
) -> ValidationResult {
    let (value, min, max) = (value.into(), min.into(), max.into());
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
