//! Parameter validation errors.
//!
//! Setters in this workspace follow a reject-and-retain policy: an invalid
//! value leaves the target untouched, emits a `tracing` warning, and returns
//! one of these errors so callers can decide whether it matters.

use thiserror::Error;

/// A rejected parameter write.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    /// Integer value outside its inclusive range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: &'static str,
        /// The rejected value.
        value: i64,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
    },

    /// Floating-point value outside its inclusive range (or not finite).
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRangeF32 {
        /// Name of the parameter.
        param: &'static str,
        /// The rejected value.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Index past the end of a fixed-size collection.
    #[error("index {index} out of bounds for '{param}' (len {len})")]
    IndexOutOfRange {
        /// Name of the indexed collection.
        param: &'static str,
        /// The rejected index.
        index: usize,
        /// Collection length.
        len: usize,
    },

    /// A note name could not be parsed.
    #[error("invalid note name '{0}'")]
    InvalidNoteName(String),
}

/// Check `value` against an inclusive integer range.
///
/// Logs a warning and returns [`ParamError::OutOfRange`] when rejected.
pub fn check_range(
    param: &'static str,
    value: i64,
    range: core::ops::RangeInclusive<i64>,
) -> Result<(), ParamError> {
    if range.contains(&value) {
        Ok(())
    } else {
        tracing::warn!(
            param,
            value,
            min = *range.start(),
            max = *range.end(),
            "rejected out-of-range value"
        );
        Err(ParamError::OutOfRange {
            param,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Check `value` against an inclusive float range. NaN is always rejected.
pub fn check_range_f32(
    param: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ParamError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        tracing::warn!(param, value, min, max, "rejected out-of-range value");
        Err(ParamError::OutOfRangeF32 {
            param,
            value,
            min,
            max,
        })
    }
}

/// Check `index` against a collection length.
pub fn check_index(param: &'static str, index: usize, len: usize) -> Result<(), ParamError> {
    if index < len {
        Ok(())
    } else {
        tracing::warn!(param, index, len, "rejected out-of-bounds index");
        Err(ParamError::IndexOutOfRange { param, index, len })
    }
}
